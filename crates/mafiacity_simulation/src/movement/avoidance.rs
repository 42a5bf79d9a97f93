//! CollisionAvoidance: попарная проверка перекрытия и вектор отталкивания

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::components::BotId;

/// Hitbox = 80% размера спрайта (свободнее проходить мимо соседей)
pub const HITBOX_SCALE: f32 = 0.8;

/// Соседи ближе чем `self_width + AVOIDANCE_PADDING` участвуют в отталкивании
pub const AVOIDANCE_PADDING: f32 = 50.0;

/// Векторы короче этого порога не нормализуем (соседи практически совпадают)
const MIN_AWAY_LENGTH: f32 = 0.1;

/// Read-only снимок соседа на время одного обновления бота.
///
/// Вместо ссылок на других ботов: контейнер может переаллоцироваться
/// между кадрами, снимок копируется.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerView {
    pub id: BotId,
    pub position: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub spawned: bool,
}

impl PeerView {
    /// Мёртвые, не заспавненные и сам бот не считаются препятствием
    fn blocks(&self, self_id: BotId) -> bool {
        self.id != self_id && self.alive && self.spawned
    }
}

/// Уменьшенный hitbox с центром в `center`
pub fn hitbox(center: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(center, size * HITBOX_SCALE)
}

/// AABB перекрытие, касание (нулевой зазор) считается перекрытием.
pub fn rects_touch(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Столкнётся ли бот размера `self_size`, поставленный в `candidate`,
/// с кем-нибудь из живых заспавненных соседей.
pub fn would_collide(candidate: Vec2, self_size: Vec2, self_id: BotId, peers: &[PeerView]) -> bool {
    let own = hitbox(candidate, self_size);

    peers
        .iter()
        .filter(|peer| peer.blocks(self_id))
        .any(|peer| rects_touch(own, hitbox(peer.position, peer.size)))
}

/// Единичный вектор ухода от соседей для заблокированной позиции.
///
/// Усредняет нормализованные векторы "сосед → blocked" по всем соседям
/// в радиусе `self_width + 50`. Если никто не дал вклад (все совпадают
/// с позицией или векторы взаимно гасятся) возвращает случайное направление.
pub fn avoidance_direction<R: Rng + ?Sized>(
    blocked: Vec2,
    self_width: f32,
    self_id: BotId,
    peers: &[PeerView],
    rng: &mut R,
) -> Vec2 {
    let range = self_width + AVOIDANCE_PADDING;
    let mut accumulated = Vec2::ZERO;
    let mut contributors = 0u32;

    for peer in peers.iter().filter(|peer| peer.blocks(self_id)) {
        if blocked.distance(peer.position) >= range {
            continue;
        }

        let away = blocked - peer.position;
        if away.length() > MIN_AWAY_LENGTH {
            accumulated += away.normalize();
            contributors += 1;
        }
    }

    if contributors > 0 {
        let average = accumulated / contributors as f32;
        if let Some(direction) = average.try_normalize() {
            return direction;
        }
    }

    random_direction(rng)
}

/// Равномерно случайное направление
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}
