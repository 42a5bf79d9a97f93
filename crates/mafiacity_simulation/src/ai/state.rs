//! BehaviorState + всё, что из него следует (клип, зеркалирование, рестарт).
//!
//! Движение, анимация и выбор текстуры читают `BehaviorState::traits()`,
//! а не матчат состояние каждый у себя.

use bevy::prelude::*;

use crate::components::Facing;

/// Поведенческое состояние бота
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum BehaviorState {
    #[default]
    Idle,
    Wandering,
    Chasing,
    Fleeing,
    Attacking,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 5] = [
        BehaviorState::Idle,
        BehaviorState::Wandering,
        BehaviorState::Chasing,
        BehaviorState::Fleeing,
        BehaviorState::Attacking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::Idle => "Idle",
            BehaviorState::Wandering => "Wandering",
            BehaviorState::Chasing => "Chasing",
            BehaviorState::Fleeing => "Fleeing",
            BehaviorState::Attacking => "Attacking",
        }
    }

    pub const fn traits(self) -> StateTraits {
        match self {
            BehaviorState::Idle => StateTraits {
                slot: ClipSlot::Idle,
                restarts_clip: false,
            },
            BehaviorState::Wandering => StateTraits {
                slot: ClipSlot::Walk,
                restarts_clip: false,
            },
            BehaviorState::Chasing | BehaviorState::Fleeing => StateTraits {
                slot: ClipSlot::Run,
                restarts_clip: false,
            },
            BehaviorState::Attacking => StateTraits {
                slot: ClipSlot::Attack,
                restarts_clip: true,
            },
        }
    }
}

/// Что состояние означает для анимации и рендера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTraits {
    pub slot: ClipSlot,
    /// Клип сбрасывается на первый кадр при входе в состояние
    pub restarts_clip: bool,
}

/// Логический слот анимации (без учёта направления)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ClipSlot {
    Idle,
    Walk,
    Run,
    Attack,
}

/// Конкретный клип (и текстура) бота
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ClipId {
    IdleRight,
    IdleLeft,
    Walk,
    Run,
    Attack,
}

impl ClipId {
    pub fn resolve(slot: ClipSlot, facing: Facing) -> Self {
        match (slot, facing) {
            (ClipSlot::Idle, Facing::Right) => ClipId::IdleRight,
            (ClipSlot::Idle, Facing::Left) => ClipId::IdleLeft,
            (ClipSlot::Walk, _) => ClipId::Walk,
            (ClipSlot::Run, _) => ClipId::Run,
            (ClipSlot::Attack, _) => ClipId::Attack,
        }
    }

    /// Для idle есть отдельный left-лист, остальные зеркалятся
    pub fn has_left_sheet(&self) -> bool {
        matches!(self, ClipId::IdleRight | ClipId::IdleLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_mapping() {
        assert_eq!(BehaviorState::Idle.traits().slot, ClipSlot::Idle);
        assert_eq!(BehaviorState::Wandering.traits().slot, ClipSlot::Walk);
        assert_eq!(BehaviorState::Chasing.traits().slot, ClipSlot::Run);
        assert_eq!(BehaviorState::Fleeing.traits().slot, ClipSlot::Run);
        assert_eq!(BehaviorState::Attacking.traits().slot, ClipSlot::Attack);
    }

    #[test]
    fn test_only_attacking_restarts_clip() {
        let restarting: Vec<_> = BehaviorState::ALL
            .into_iter()
            .filter(|state| state.traits().restarts_clip)
            .collect();
        assert_eq!(restarting, vec![BehaviorState::Attacking]);
    }

    #[test]
    fn test_idle_resolves_by_facing() {
        assert_eq!(ClipId::resolve(ClipSlot::Idle, Facing::Right), ClipId::IdleRight);
        assert_eq!(ClipId::resolve(ClipSlot::Idle, Facing::Left), ClipId::IdleLeft);
        assert_eq!(ClipId::resolve(ClipSlot::Run, Facing::Left), ClipId::Run);
        assert!(ClipId::IdleLeft.has_left_sheet());
        assert!(!ClipId::Attack.has_left_sheet());
    }
}
