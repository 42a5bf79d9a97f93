//! AI decision-making module
//!
//! - state: BehaviorState и его traits (клип, рестарт анимации)
//! - wander: TargetGenerator (wander цели + patrol маршрут)
//! - bot: AgentStateMachine (`Bot` компонент)
//! - systems: ECS обвязка (порядок по BotId, снимок соседей, события)

use bevy::prelude::*;

pub mod bot;
pub mod state;
pub mod systems;
pub mod wander;


// Re-export основных типов
pub use bot::{Bot, BotClips, Decision, TickReport, LOW_HEALTH_FRACTION};
pub use state::{BehaviorState, ClipId, ClipSlot, StateTraits};
pub use systems::{AttackStarted, BotStateChanged, PeerSnapshot};
pub use wander::{pick_wander_target, PatrolRoute, WanderPick, WanderState, PATROL_REACH, WANDER_ATTEMPTS, WANDER_REACH};

use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения в FixedUpdate:
/// 1. bot_decisions (`SimulationSet::Decide`)
/// 2. clamp_bots_to_arena (`SimulationSet::Clamp`)
/// 3. animate_bots (`SimulationSet::Animate`)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BotStateChanged>()
            .add_event::<AttackStarted>()
            .init_resource::<PeerSnapshot>();

        app.add_systems(
            FixedUpdate,
            (
                systems::bot_decisions.in_set(SimulationSet::Decide),
                systems::clamp_bots_to_arena.in_set(SimulationSet::Clamp),
                systems::animate_bots.in_set(SimulationSet::Animate),
            ),
        );
    }
}
