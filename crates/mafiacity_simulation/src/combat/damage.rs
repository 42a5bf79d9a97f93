//! Damage система
//!
//! Кто наносит урон (пули игрока, ловушки) ядро не знает: внешний слой
//! шлёт `DamageBot`, здесь урон применяется к `Bot` и генерируется `BotDied`.

use bevy::prelude::*;

use crate::ai::Bot;

/// Запрос: нанести урон боту
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageBot {
    pub target: Entity,
    pub amount: u32,
}

/// Событие: бот умер (health дошёл до 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct BotDied {
    pub bot: Entity,
}

/// Компонент-маркер: бот мёртв
///
/// Трупы не деспавнятся, AI просто перестаёт принимать решения.
#[derive(Component, Debug)]
pub struct Dead;

/// Система: применяет `DamageBot` к `Bot`
pub fn apply_bot_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageBot>,
    mut died_events: EventWriter<BotDied>,
    mut bots: Query<&mut Bot>,
) {
    for event in damage_events.read() {
        let Ok(mut bot) = bots.get_mut(event.target) else {
            crate::log_warning(&format!("DamageBot: target {:?} is not a bot", event.target));
            continue;
        };

        let died = bot.apply_damage(event.amount);
        let health = bot.health();
        crate::log_info(&format!(
            "Damage: {:?} took {} (health {}/{})",
            bot.id(),
            event.amount,
            health.current,
            health.max
        ));

        if died {
            crate::log_info(&format!("Death: {:?} ({})", bot.id(), bot.kind().as_str()));
            commands.entity(event.target).insert(Dead);
            died_events.write(BotDied { bot: event.target });
        }
    }
}
