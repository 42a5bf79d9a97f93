//! Population management: создание ботов
//!
//! Боты создаются сразу, но активируются только после `spawn_delay`
//! (см. `CombatTimer`).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::Bot;
use crate::components::{BotId, BotKind};
use crate::config::SimulationConfig;

/// Отступ зоны появления от левого/верхнего края
pub const SPAWN_MIN_OFFSET: f32 = 100.0;
/// Отступ зоны появления от правого/нижнего края
pub const SPAWN_MAX_OFFSET: f32 = 300.0;

/// Монотонная выдача `BotId`
#[derive(Resource, Debug, Default)]
pub struct BotIdAllocator {
    next: u32,
}

impl BotIdAllocator {
    pub fn allocate(&mut self) -> BotId {
        let id = BotId(self.next);
        self.next += 1;
        id
    }
}

/// Случайная точка появления: x ∈ [100, W-300], y ∈ [100, H-300]
pub fn random_spawn_position<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Vec2 {
    let arena = config.arena;
    Vec2::new(
        sample_axis(arena.width, rng),
        sample_axis(arena.height, rng),
    )
}

fn sample_axis<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> f32 {
    let max = extent - SPAWN_MAX_OFFSET;
    if max <= SPAWN_MIN_OFFSET {
        return SPAWN_MIN_OFFSET;
    }
    rng.gen_range(SPAWN_MIN_OFFSET..=max)
}

/// Создаёт одного бота заданного типа
pub fn spawn_bot(
    commands: &mut Commands,
    ids: &mut BotIdAllocator,
    config: &SimulationConfig,
    kind: BotKind,
    position: Vec2,
) -> Entity {
    let id = ids.allocate();
    let stats = config.stats.get(kind);
    let bot = Bot::new(id, kind, stats, position, config.sprite_size.as_vec2(), config.spawn_delay);

    crate::log(&format!("Spawn: {:?} ({}) queued at {:?}", id, kind.as_str(), position));
    commands.spawn(bot).id()
}

/// Создаёт `count` ботов случайных типов в случайных точках
pub fn spawn_bots<R: Rng + ?Sized>(
    commands: &mut Commands,
    ids: &mut BotIdAllocator,
    config: &SimulationConfig,
    count: usize,
    rng: &mut R,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let kind = BotKind::ALL[rng.gen_range(0..BotKind::ALL.len())];
            let position = random_spawn_position(config, rng);
            spawn_bot(commands, ids, config, kind, position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = BotIdAllocator::default();
        assert_eq!(ids.allocate(), BotId(0));
        assert_eq!(ids.allocate(), BotId(1));
        assert_eq!(ids.allocate(), BotId(2));
    }

    #[test]
    fn test_spawn_positions_in_zone() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..500 {
            let position = random_spawn_position(&config, &mut rng);
            assert!((100.0..=660.0).contains(&position.x), "{:?}", position);
            assert!((100.0..=240.0).contains(&position.y), "{:?}", position);
        }
    }

    #[test]
    fn test_degenerate_arena_uses_min_offset() {
        let mut config = SimulationConfig::default();
        config.arena.height = 350.0;
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let position = random_spawn_position(&config, &mut rng);
        assert_eq!(position.y, SPAWN_MIN_OFFSET);
    }

    #[test]
    fn test_spawn_bots_queues_entities() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let mut ids = BotIdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let entities = {
            let mut commands = world.commands();
            spawn_bots(&mut commands, &mut ids, &config, 4, &mut rng)
        };
        world.flush();

        assert_eq!(entities.len(), 4);
        let mut seen: Vec<BotId> = entities
            .iter()
            .map(|entity| world.get::<Bot>(*entity).unwrap().id())
            .collect();
        seen.sort();
        assert_eq!(seen, vec![BotId(0), BotId(1), BotId(2), BotId(3)]);

        for entity in entities {
            let bot = world.get::<Bot>(entity).unwrap();
            assert!(!bot.is_spawned());
            assert_eq!(bot.size(), Vec2::splat(256.0));
        }
    }
}
