//! Конфигурация симуляции (JSON)
//!
//! Все поля опциональны: отсутствующие берутся из `Default`.
//! ```json
//! { "seed": 7, "bot_count": 4, "stats": { "Passive": { ... } } }
//! ```

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::PeerSnapshot;
use crate::components::{Arena, BotStatTable, BotStats, WANDER_MARGIN};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Размер кадра спрайта на экране
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for SpriteSize {
    fn default() -> Self {
        Self {
            width: 256.0,
            height: 256.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub arena: Arena,
    pub bot_count: usize,
    /// Задержка появления новых ботов (секунды)
    pub spawn_delay: f32,
    pub sprite_size: SpriteSize,
    pub peer_snapshot: PeerSnapshot,
    pub stats: BotStatTable,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
            bot_count: 10,
            spawn_delay: 15.0,
            sprite_size: SpriteSize::default(),
            peer_snapshot: PeerSnapshot::default(),
            stats: BotStatTable::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_side = 2.0 * WANDER_MARGIN;
        if !(self.arena.width > min_side && self.arena.height > min_side) {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} must exceed the {} unit wander margin on both axes",
                self.arena.width, self.arena.height, min_side
            )));
        }

        if !(self.spawn_delay >= 0.0 && self.spawn_delay.is_finite()) {
            return Err(ConfigError::Invalid(format!("spawn_delay {} must be >= 0", self.spawn_delay)));
        }

        if !(self.sprite_size.width > 0.0 && self.sprite_size.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sprite_size {}x{} must be positive",
                self.sprite_size.width, self.sprite_size.height
            )));
        }

        for (kind, stats) in self.stats.iter() {
            validate_stats(stats).map_err(|reason| ConfigError::Invalid(format!("{}: {}", kind.as_str(), reason)))?;
        }

        Ok(())
    }
}

fn validate_stats(stats: &BotStats) -> Result<(), String> {
    let fields = [
        ("move_speed", stats.move_speed),
        ("chase_radius", stats.chase_radius),
        ("attack_radius", stats.attack_radius),
        ("flee_radius", stats.flee_radius),
        ("wander_period", stats.wander_period),
        ("attack_cooldown", stats.attack_cooldown),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, value)| !(*value >= 0.0 && value.is_finite())) {
        return Err(format!("{} = {} must be a non-negative number", name, value));
    }

    if stats.max_health == 0 {
        return Err("max_health must be > 0".to_string());
    }

    Ok(())
}
