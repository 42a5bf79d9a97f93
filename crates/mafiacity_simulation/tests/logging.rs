//! Logger integration test
//!
//! Отдельный test binary: глобальный sink не делится с другими тестами.

use bevy::prelude::*;
use mafiacity_simulation::*;

#[test]
fn test_memory_logger_captures_unknown_kind_warning() {
    let logger = MemoryLogger::default();
    let lines = logger.lines();
    set_logger(Box::new(logger));
    set_log_level(LogLevel::Debug);

    // Конфиг без статов: каждый бот получает нейтральный профиль
    let config = SimulationConfig {
        stats: BotStatTable::empty(),
        ..default()
    };
    let mut world = World::new();
    let mut ids = BotIdAllocator::default();
    let entity = {
        let mut commands = world.commands();
        spawn_bot(&mut commands, &mut ids, &config, BotKind::Disciplined, Vec2::new(200.0, 200.0))
    };
    world.flush();

    let bot = world.get::<Bot>(entity).expect("bot spawned");
    assert_eq!(*bot.stats(), BotStats::neutral());

    let lines = lines.lock().expect("log buffer");
    let warnings: Vec<_> = lines
        .iter()
        .filter(|(level, _)| *level == LogLevel::Warning)
        .map(|(_, line)| line.as_str())
        .collect();
    assert_eq!(warnings.len(), 1, "{:?}", *lines);
    assert!(warnings[0].contains("falling back to neutral profile"));
    assert!(warnings[0].contains(BotKind::Disciplined.as_str()));

    // Debug строка о постановке бота в очередь тоже попала в буфер
    assert!(lines
        .iter()
        .any(|(level, line)| *level == LogLevel::Debug && line.contains("Spawn:")));
}
