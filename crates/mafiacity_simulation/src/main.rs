//! Headless симуляция Mafia City
//!
//! Запускает Bevy App без рендера: игрок ходит туда-обратно,
//! боты появляются, гоняются, бродят. Раз в 100 кадров печатает сводку.
//!
//! Usage: mafiacity_simulation [config.json]

use std::process::ExitCode;

use bevy::prelude::*;
use mafiacity_simulation::player::spawn_player;
use mafiacity_simulation::{
    create_simulation_app, init_logger, log_error, log_info, populate, step_simulation, BehaviorState, Bot,
    PlayerIntent, SimulationConfig,
};

const FRAMES: u32 = 1000;
const FRAME_DELTA: f32 = 1.0 / 60.0;
/// Игрок меняет направление каждые N кадров
const WALK_SWING_FRAMES: u32 = 240;

fn load_config() -> Result<SimulationConfig, mafiacity_simulation::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path),
        None => Ok(SimulationConfig::default()),
    }
}

fn census(world: &mut World) -> String {
    let mut query = world.query::<&Bot>();
    let mut waiting = 0;
    let mut dead = 0;
    let mut counts = [0usize; BehaviorState::ALL.len()];

    for bot in query.iter(world) {
        if !bot.is_spawned() {
            waiting += 1;
        } else if !bot.is_alive() {
            dead += 1;
        } else if let Some(slot) = BehaviorState::ALL.iter().position(|state| *state == bot.current_state()) {
            counts[slot] += 1;
        }
    }

    let states: Vec<String> = BehaviorState::ALL
        .iter()
        .zip(counts)
        .map(|(state, count)| format!("{}={}", state.as_str(), count))
        .collect();
    format!("waiting={} dead={} {}", waiting, dead, states.join(" "))
}

fn main() -> ExitCode {
    init_logger();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config: {}", err));
            return ExitCode::FAILURE;
        }
    };

    log_info(&format!(
        "Starting Mafia City headless simulation (seed: {}, bots: {})",
        config.seed, config.bot_count
    ));

    let arena = config.arena;
    let bot_count = config.bot_count;
    let mut app = create_simulation_app(config);
    let world = app.world_mut();

    let player = {
        let mut commands = world.commands();
        spawn_player(
            &mut commands,
            Vec2::new(arena.width * 0.5, arena.height - 150.0),
            Vec2::splat(128.0),
        )
    };
    world.flush();
    populate(world, bot_count);

    for frame in 0..FRAMES {
        let heading = if (frame / WALK_SWING_FRAMES) % 2 == 0 { 1.0 } else { -1.0 };
        if let Some(mut intent) = world.get_mut::<PlayerIntent>(player) {
            intent.horizontal = heading;
        }

        step_simulation(world, FRAME_DELTA);

        if frame % 100 == 0 {
            log_info(&format!("Frame {}: {}", frame, census(world)));
        }
    }

    log_info(&format!("Simulation complete: {}", census(world)));
    ExitCode::SUCCESS
}
