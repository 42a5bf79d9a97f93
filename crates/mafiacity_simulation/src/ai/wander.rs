//! TargetGenerator: случайные wander-цели и циклический патруль.
//!
//! Wander: до `WANDER_ATTEMPTS` кандидатов, каждый зажат в арену
//! (отступ `WANDER_MARGIN`) и проверен на коллизию с соседями.
//! Patrol: заранее проверенный маршрут, без избегания.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::components::Arena;
use crate::movement::{would_collide, Body, PeerView};

/// Сколько кандидатов пробуем перед отказом
pub const WANDER_ATTEMPTS: usize = 10;

/// Ближе этого к цели считаем, что дошли
pub const WANDER_REACH: f32 = 15.0;

/// Дистанция подхода к waypoint патруля
pub const PATROL_REACH: f32 = 50.0;

/// Текущая wander-цель + сколько ещё идти к ней
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct WanderState {
    pub target: Vec2,
    pub countdown: f32,
}

impl WanderState {
    /// Пора выбирать новую цель
    pub fn needs_target(&self, position: Vec2) -> bool {
        self.countdown <= 0.0 || position.distance(self.target) < WANDER_REACH
    }
}

/// Результат поиска wander-цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WanderPick {
    /// Свободная точка, идти к ней `countdown` секунд
    Target { position: Vec2, countdown: f32 },
    /// Осознанная пауза на месте
    Hold { position: Vec2, countdown: f32 },
    /// Все попытки упёрлись в соседей
    Exhausted,
}

/// Выбирает wander-цель для `body`.
///
/// Паттерны равновероятны: случайная точка на 100–200, горизонтальный
/// выход на 150–300 в одну из сторон, или стоять на месте.
pub fn pick_wander_target<R: Rng + ?Sized>(
    body: &Body,
    arena: &Arena,
    peers: &[PeerView],
    rng: &mut R,
) -> WanderPick {
    let origin = body.position;

    for _ in 0..WANDER_ATTEMPTS {
        let candidate = match rng.gen_range(0..3) {
            0 => {
                let distance = rng.gen_range(100.0..=200.0);
                let angle = rng.gen_range(0.0..TAU);
                origin + Vec2::from_angle(angle) * distance
            }
            1 => {
                let distance = rng.gen_range(150.0..=300.0);
                let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let drift = rng.gen_range(-50.0..=50.0);
                origin + Vec2::new(side * distance, drift)
            }
            _ => {
                return WanderPick::Hold {
                    position: arena.clamp_wander_target(origin),
                    countdown: rng.gen_range(2.0..=4.0),
                };
            }
        };

        let candidate = arena.clamp_wander_target(candidate);
        if !would_collide(candidate, body.size, body.id, peers) {
            return WanderPick::Target {
                position: candidate,
                countdown: rng.gen_range(3.0..=8.0),
            };
        }
    }

    WanderPick::Exhausted
}

/// Циклический маршрут патруля
#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub struct PatrolRoute {
    waypoints: Vec<Vec2>,
    current: usize,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current).copied()
    }

    /// Куда идти из `position` в этом кадре.
    ///
    /// Если waypoint достигнут, переключаемся на следующий (по кругу)
    /// и в этом кадре стоим. Пустой маршрут → None.
    pub fn steer(&mut self, position: Vec2) -> Option<Vec2> {
        let waypoint = self.current_waypoint()?;

        if position.distance(waypoint) < PATROL_REACH {
            self.current = (self.current + 1) % self.waypoints.len();
            return None;
        }

        Some(waypoint)
    }
}
