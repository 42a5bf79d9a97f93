//! MovementResolver: желаемое направление → смещение позиции
//!
//! Ответственность только за шаг и facing. Границы арены применяет
//! frame-level clamp система.

use bevy::prelude::*;
use rand::Rng;

use crate::components::Facing;
use crate::movement::avoidance::{avoidance_direction, would_collide, PeerView};
use crate::movement::body::Body;

/// Dead-zone по x для смены facing (почти вертикальное движение не дёргает спрайт)
pub const FACING_DEAD_ZONE: f32 = 0.1;

/// Бегство быстрее обычного движения
pub const FLEE_SPEED_MULTIPLIER: f32 = 1.5;

/// Параметры одного шага к цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stride {
    /// Скорость (единиц/сек)
    pub speed: f32,
    /// Множитель скорости при обходе соседей
    pub avoid_factor: f32,
    /// Минимальная дистанция до цели (0 = подходим вплотную)
    pub stand_off: f32,
}

impl Stride {
    /// Преследование: обход на половине скорости, держим 70 единиц до цели
    pub fn chase(speed: f32) -> Self {
        Self {
            speed,
            avoid_factor: 0.5,
            stand_off: 70.0,
        }
    }

    /// Wander: медленный обход, без stand-off
    pub fn wander(speed: f32) -> Self {
        Self {
            speed,
            // 0.3, не половина: блуждающий бот обходит медленнее преследующего
            avoid_factor: 0.3,
            stand_off: 0.0,
        }
    }

    /// Патруль: полная скорость, без обхода
    pub fn patrol(speed: f32) -> Self {
        Self {
            speed,
            avoid_factor: 0.0,
            stand_off: 0.0,
        }
    }
}

/// Что произошло за шаг
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Сделан обычный шаг к цели
    Moved,
    /// Следующая позиция блокирована, шаг вдоль вектора избегания
    Avoided,
    /// Шаг нарушил бы stand-off дистанцию, стоим
    HeldStandOff,
    /// Нулевое направление (уже в цели), движения нет
    Stationary,
}

/// Шаг к `target`.
///
/// С `peers` проверяет коллизию следующей позиции: если занято,
/// идём по `avoidance_direction` со скоростью `speed * avoid_factor`.
/// Facing обновляется по направлению, которое реально использовано.
pub fn move_toward<R: Rng + ?Sized>(
    body: &mut Body,
    target: Vec2,
    delta: f32,
    stride: Stride,
    peers: Option<&[PeerView]>,
    rng: &mut R,
) -> MoveOutcome {
    let Some(direction) = (target - body.position).try_normalize() else {
        return MoveOutcome::Stationary;
    };

    if let Some(peers) = peers {
        let next = body.position + direction * stride.speed * delta;
        if would_collide(next, body.size, body.id, peers) {
            let avoid = avoidance_direction(next, body.size.x, body.id, peers, rng);
            body.position += avoid * stride.speed * stride.avoid_factor * delta;
            face_along(body, avoid.x);
            return MoveOutcome::Avoided;
        }
    }

    advance(body, direction, target, delta, stride)
}

/// Шаг к `target` без проверки соседей (патруль).
pub fn step_toward(body: &mut Body, target: Vec2, delta: f32, stride: Stride) -> MoveOutcome {
    let Some(direction) = (target - body.position).try_normalize() else {
        return MoveOutcome::Stationary;
    };
    advance(body, direction, target, delta, stride)
}

fn advance(body: &mut Body, direction: Vec2, target: Vec2, delta: f32, stride: Stride) -> MoveOutcome {
    let next = body.position + direction * stride.speed * delta;

    // Смотрим на цель даже если stand-off не даёт подойти
    face_along(body, direction.x);

    if stride.stand_off > 0.0 && next.distance(target) <= stride.stand_off {
        return MoveOutcome::HeldStandOff;
    }

    body.position = next;
    MoveOutcome::Moved
}

/// Шаг прочь от `threat` на `speed * 1.5`, без проверки коллизий.
pub fn move_away(body: &mut Body, threat: Vec2, delta: f32, speed: f32) -> MoveOutcome {
    let Some(direction) = (body.position - threat).try_normalize() else {
        return MoveOutcome::Stationary;
    };

    body.position += direction * speed * FLEE_SPEED_MULTIPLIER * delta;
    face_along(body, direction.x);
    MoveOutcome::Moved
}

fn face_along(body: &mut Body, direction_x: f32) {
    body.facing = Facing::from_direction_x(body.facing, direction_x, FACING_DEAD_ZONE);
}
