//! Body: кинематика бота (позиция + размер + направление взгляда)

use bevy::prelude::*;

use crate::components::{BotId, Facing};
use crate::movement::avoidance::{hitbox, PeerView};

/// Тело бота
///
/// `position` это центр спрайта. Full-size bounds и hitbox для
/// избегания строятся вокруг центра.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BotId,
    pub position: Vec2,
    /// Размер спрайта на экране
    pub size: Vec2,
    pub facing: Facing,
}

impl Body {
    pub fn new(id: BotId, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            position,
            size,
            facing: Facing::Right,
        }
    }

    /// Full-size прямоугольник спрайта
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// Уменьшенный hitbox для избегания столкновений
    pub fn hitbox(&self) -> Rect {
        hitbox(self.position, self.size)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    /// Read-only снимок для соседей в текущем кадре
    pub fn peer_view(&self, alive: bool, spawned: bool) -> PeerView {
        PeerView {
            id: self.id,
            position: self.position,
            size: self.size,
            alive,
            spawned,
        }
    }
}
