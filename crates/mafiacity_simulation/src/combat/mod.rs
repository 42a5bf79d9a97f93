//! Combat module: таймеры (spawn delay + attack cooldown) и урон
//!
//! Решение атаковать принимает state machine бота (`ai::Bot::tick`),
//! здесь только тикают таймеры и применяется входящий урон.

use bevy::prelude::*;

pub mod damage;
pub mod timer;

pub use damage::{apply_bot_damage, BotDied, DamageBot, Dead};
pub use timer::CombatTimer;

use crate::ai::Bot;
use crate::SimulationSet;

/// Событие: бот появился (spawn delay истёк), AI активен
#[derive(Event, Debug, Clone, Copy)]
pub struct BotSpawned {
    pub bot: Entity,
}

/// Система: продвигает spawn delay и cooldown атаки у всех ботов
pub fn tick_combat_timers(
    mut bots: Query<(Entity, &mut Bot)>,
    time: Res<Time>,
    mut spawned_events: EventWriter<BotSpawned>,
) {
    let delta = time.delta_secs();

    for (entity, mut bot) in bots.iter_mut() {
        if bot.advance_timers(delta) {
            crate::log_info(&format!(
                "Spawn: {:?} ({}) active at {:?}",
                bot.id(),
                bot.kind().as_str(),
                bot.position()
            ));
            spawned_events.write(BotSpawned { bot: entity });
        }
    }
}

/// Combat Plugin
///
/// 1. tick_combat_timers (`SimulationSet::Timers`), до решений AI
/// 2. apply_bot_damage (`SimulationSet::Damage`), в конце кадра
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BotSpawned>()
            .add_event::<DamageBot>()
            .add_event::<BotDied>();

        app.add_systems(FixedUpdate, tick_combat_timers.in_set(SimulationSet::Timers))
            .add_systems(FixedUpdate, apply_bot_damage.in_set(SimulationSet::Damage));
    }
}
