//! Базовые характеристики акторов: Health, Facing

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. Актор жив пока `current > 0`,
/// переход жив → мертв происходит только через `take_damage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Health с произвольным текущим значением (clamp в [0, max])
    pub fn with_current(max: u32, current: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// health = max(0, health - amount)
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Доля здоровья в [0, 1] (для health bar)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Направление взгляда спрайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Обновление по x-компоненте направления с dead-zone.
    ///
    /// Внутри dead-zone сохраняем текущее направление (почти вертикальное
    /// движение не должно дёргать спрайт).
    pub fn from_direction_x(current: Facing, direction_x: f32, dead_zone: f32) -> Facing {
        if direction_x < -dead_zone {
            Facing::Left
        } else if direction_x > dead_zone {
            Facing::Right
        } else {
            current
        }
    }
}
