//! AI systems: решения, clamp в арену, анимация.
//!
//! Боты обрабатываются по возрастанию `BotId`, чтобы порядок (и RNG поток)
//! не зависел от порядка хранения в ECS. В режиме `PeerSnapshot::Sequential`
//! следующие боты видят позицию после `Bot::tick`, уже прижатую к арене.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::bot::{Bot, TickReport};
use crate::components::{Arena, BotId, BotKind, TrackedTarget};
use crate::movement::PeerView;
use crate::DeterministicRng;

use super::BehaviorState;

/// Какие позиции соседей видит бот при избегании
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeerSnapshot {
    /// Уже обработанные в этом кадре соседи видны на новых позициях
    #[default]
    Sequential,
    /// Все видят позиции на начало кадра
    FrameStart,
}

/// Событие: смена поведенческого состояния
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BotStateChanged {
    pub bot: Entity,
    pub from: BehaviorState,
    pub to: BehaviorState,
}

/// Событие: бот начал атаку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackStarted {
    pub bot: Entity,
    pub kind: BotKind,
}

fn sorted_roster<'a>(bots: impl Iterator<Item = (Entity, &'a Bot)>) -> Vec<(BotId, Entity, PeerView)> {
    let mut roster: Vec<_> = bots.map(|(entity, bot)| (bot.id(), entity, bot.peer_view())).collect();
    roster.sort_by_key(|(id, _, _)| *id);
    roster
}

fn report_transition(entity: Entity, bot: &Bot, report: TickReport, events: &mut EventWriter<BotStateChanged>) {
    if !report.changed() {
        return;
    }
    crate::log(&format!(
        "AI: {:?} {} → {}",
        bot.id(),
        report.previous.as_str(),
        report.current.as_str()
    ));
    events.write(BotStateChanged {
        bot: entity,
        from: report.previous,
        to: report.current,
    });
}

/// Система: AgentStateMachine для всех ботов
pub fn bot_decisions(
    mut bots: Query<(Entity, &mut Bot)>,
    target: Res<TrackedTarget>,
    arena: Res<Arena>,
    snapshot_mode: Res<PeerSnapshot>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut state_events: EventWriter<BotStateChanged>,
    mut attack_events: EventWriter<AttackStarted>,
) {
    let delta = time.delta_secs();
    let roster = sorted_roster(bots.iter());
    let mut peers: Vec<PeerView> = roster.iter().map(|(_, _, view)| *view).collect();

    for (slot, (_, entity, _)) in roster.iter().enumerate() {
        let Ok((_, mut bot)) = bots.get_mut(*entity) else {
            continue;
        };

        let report = bot.tick(target.0, delta, &peers, &arena, &mut rng.rng);

        if *snapshot_mode == PeerSnapshot::Sequential {
            peers[slot] = bot.peer_view();
        }

        if report.attacked {
            crate::log(&format!("AI: {:?} attacks target at {:?}", bot.id(), target.0));
            attack_events.write(AttackStarted {
                bot: *entity,
                kind: bot.kind(),
            });
        }
        report_transition(*entity, &bot, report, &mut state_events);
    }
}

/// Система: frame-level clamp позиций в арену
pub fn clamp_bots_to_arena(mut bots: Query<&mut Bot>, arena: Res<Arena>) {
    for mut bot in bots.iter_mut() {
        bot.clamp_to_arena(&arena);
    }
}

/// Система: AnimationScheduler + выход из Attacking по концу клипа
pub fn animate_bots(
    mut bots: Query<(Entity, &mut Bot)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut state_events: EventWriter<BotStateChanged>,
) {
    let delta = time.delta_secs();
    let roster = sorted_roster(bots.iter());

    for (_, entity, _) in roster {
        let Ok((_, mut bot)) = bots.get_mut(entity) else {
            continue;
        };
        let report = bot.animate(delta, &mut rng.rng);
        report_transition(entity, &bot, report, &mut state_events);
    }
}
