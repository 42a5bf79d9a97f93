//! Арена и отслеживаемая цель

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Отступ wander целей от края арены
pub const WANDER_MARGIN: f32 = 100.0;

/// Границы арены (экран), начало координат в левом верхнем углу
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp wander кандидата в [margin, dimension - margin] по обеим осям.
    pub fn clamp_wander_target(&self, candidate: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(candidate.x, WANDER_MARGIN, self.width - WANDER_MARGIN),
            clamp_axis(candidate.y, WANDER_MARGIN, self.height - WANDER_MARGIN),
        )
    }

    /// Clamp центра спрайта размера `size`, чтобы спрайт целиком был в арене.
    pub fn clamp_body(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        Vec2::new(
            clamp_axis(center.x, half.x, self.width - half.x),
            clamp_axis(center.y, half.y, self.height - half.y),
        )
    }

    pub fn contains_wander_target(&self, point: Vec2) -> bool {
        point.x >= WANDER_MARGIN
            && point.x <= self.width - WANDER_MARGIN
            && point.y >= WANDER_MARGIN
            && point.y <= self.height - WANDER_MARGIN
    }
}

/// `f32::clamp` паникует при min > max (арена меньше спрайта), берём центр диапазона.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.clamp(min, max)
}

/// Отслеживаемая точка (позиция игрока), ядро её только читает.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackedTarget(pub Vec2);
