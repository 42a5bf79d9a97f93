//! Mafia City Simulation Core
//!
//! ECS-симуляция ботов на Bevy 0.16 (headless).
//! Ядро решает состояние, позицию и кадр анимации каждого бота;
//! текстуры, звук, input и отрисовка живут во внешнем слое.
//!
//! Порядок кадра (FixedUpdate, `SimulationSet`):
//! Player → Timers → Decide → Clamp → Animate → Damage

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod player;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AttackStarted, BehaviorState, Bot, BotStateChanged, PeerSnapshot};
pub use animation::{AnimationClip, FrameRect, LoopMode};
pub use combat::{BotDied, BotSpawned, CombatPlugin, CombatTimer, DamageBot, Dead};
pub use components::*;
pub use config::{ConfigError, SimulationConfig, SpriteSize};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, ConsoleLogger, LogLevel,
    LogPrinter, MemoryLogger,
};
pub use player::{PlayerCharacter, PlayerIntent, PlayerPlugin};
pub use spawn::{spawn_bot, spawn_bots, BotIdAllocator};

/// Фазы кадра симуляции (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Игрок двигается и публикует `TrackedTarget`
    Player,
    /// Spawn delay + attack cooldown
    Timers,
    /// AgentStateMachine
    Decide,
    /// Frame-level clamp в арену
    Clamp,
    Animate,
    Damage,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Player,
                SimulationSet::Timers,
                SimulationSet::Decide,
                SimulationSet::Clamp,
                SimulationSet::Animate,
                SimulationSet::Damage,
            )
                .chain(),
        );

        app.add_plugins((PlayerPlugin, CombatPlugin, AIPlugin));

        app
            // Fixed timestep 60Hz (как кадр исходной игры)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(self.config.arena)
            .insert_resource(self.config.peer_snapshot)
            .insert_resource(self.config.clone())
            .init_resource::<BotIdAllocator>();
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции с конфигом по умолчанию
pub fn create_headless_app(seed: u64) -> App {
    create_simulation_app(SimulationConfig {
        seed,
        ..default()
    })
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_simulation_app(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin::new(config)));

    app
}

/// Один кадр симуляции с заданным delta.
///
/// Двигает `Time` вручную и запускает `FixedUpdate` напрямую, без
/// накопителя fixed timestep: тесты получают точный кадровый delta.
/// В конце кадра буферы событий стареют так же, как в `First`:
/// событие живёт два кадра, потом отбрасывается.
pub fn step_simulation(world: &mut World, delta: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(delta.max(0.0)));
    world.run_schedule(FixedUpdate);
    update_simulation_events(world);
}

/// Swap double-buffer у всех событий симуляции
fn update_simulation_events(world: &mut World) {
    update_events::<BotStateChanged>(world);
    update_events::<AttackStarted>(world);
    update_events::<BotSpawned>(world);
    update_events::<DamageBot>(world);
    update_events::<BotDied>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Создаёт `count` ботов через `spawn_bots`, используя ресурсы мира
pub fn populate(world: &mut World, count: usize) -> Vec<Entity> {
    world.resource_scope(|world, config: Mut<SimulationConfig>| {
        world.resource_scope(|world, mut ids: Mut<BotIdAllocator>| {
            world.resource_scope(|world, mut rng: Mut<DeterministicRng>| {
                let entities = {
                    let mut commands = world.commands();
                    spawn_bots(&mut commands, &mut ids, &config, count, &mut rng.rng)
                };
                world.flush();
                entities
            })
        })
    })
}

/// Snapshot ботов для сравнения детерминизма
///
/// Порядок по `BotId`, формат через Debug (простейший способ).
pub fn bot_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<&Bot>();
    let mut bots: Vec<_> = query.iter(world).collect();
    bots.sort_by_key(|bot| bot.id());

    let mut snapshot = Vec::new();
    for bot in bots {
        snapshot.extend_from_slice(&bot.id().0.to_le_bytes());
        snapshot.extend_from_slice(&bot.position().x.to_bits().to_le_bytes());
        snapshot.extend_from_slice(&bot.position().y.to_bits().to_le_bytes());
        snapshot.extend_from_slice(
            format!(
                "{:?}{:?}{}{:?}",
                bot.current_state(),
                bot.facing(),
                bot.health().current,
                bot.current_animation_clip().current_frame
            )
            .as_bytes(),
        );
    }

    snapshot
}
