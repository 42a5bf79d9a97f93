//! Типы ботов и их stat bundles

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::logger::log_warning;

/// Стабильный идентификатор бота (порядок обновления внутри кадра)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub struct BotId(pub u32);

/// Тип бота
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum BotKind {
    /// Мирный житель: не атакует, всегда убегает
    Passive,
    /// Быстрый и агрессивный (thug)
    AggressiveFast,
    /// Крепкий и упорный (gangster)
    AggressiveTough,
    /// Сбалансированный (swat)
    Disciplined,
}

impl BotKind {
    pub const ALL: [BotKind; 4] = [
        BotKind::Passive,
        BotKind::AggressiveFast,
        BotKind::AggressiveTough,
        BotKind::Disciplined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Passive => "passive",
            BotKind::AggressiveFast => "aggressive-fast",
            BotKind::AggressiveTough => "aggressive-tough",
            BotKind::Disciplined => "disciplined",
        }
    }
}

/// Параметры поведения одного типа бота
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BotStats {
    /// Базовая скорость (единиц/сек)
    pub move_speed: f32,
    pub chase_radius: f32,
    pub attack_radius: f32,
    pub flee_radius: f32,
    /// Сколько стоим в Idle до Wandering (секунды)
    pub wander_period: f32,
    /// Cooldown между атаками (секунды)
    pub attack_cooldown: f32,
    pub max_health: u32,
}

impl BotStats {
    /// Нейтральный профиль: нулевые радиусы, бот только бродит.
    pub fn neutral() -> Self {
        Self {
            move_speed: 60.0,
            chase_radius: 0.0,
            attack_radius: 0.0,
            flee_radius: 0.0,
            wander_period: 3.0,
            attack_cooldown: 1.0,
            max_health: 100,
        }
    }

    pub fn for_kind(kind: BotKind) -> Self {
        match kind {
            BotKind::AggressiveFast => Self {
                move_speed: 120.0,
                chase_radius: 300.0,
                attack_radius: 100.0,
                flee_radius: 200.0,
                wander_period: 4.0,
                attack_cooldown: 0.6,
                max_health: 100,
            },
            BotKind::Passive => Self {
                move_speed: 60.0,
                chase_radius: 0.0,  // Не преследует
                attack_radius: 0.0, // Не атакует
                flee_radius: 150.0,
                wander_period: 10.0,
                attack_cooldown: 999.0,
                max_health: 50,
            },
            BotKind::AggressiveTough => Self {
                move_speed: 110.0,
                chase_radius: 350.0,
                attack_radius: 110.0,
                flee_radius: 400.0,
                wander_period: 3.0,
                attack_cooldown: 0.7,
                max_health: 130,
            },
            BotKind::Disciplined => Self {
                move_speed: 100.0,
                chase_radius: 400.0,
                attack_radius: 130.0,
                flee_radius: 300.0,
                wander_period: 6.0,
                attack_cooldown: 0.5,
                max_health: 120,
            },
        }
    }
}

/// Таблица статов по типам (грузится из конфига)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotStatTable {
    entries: HashMap<BotKind, BotStats>,
}

impl Default for BotStatTable {
    fn default() -> Self {
        Self {
            entries: BotKind::ALL
                .iter()
                .map(|&kind| (kind, BotStats::for_kind(kind)))
                .collect(),
        }
    }
}

impl BotStatTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, kind: BotKind, stats: BotStats) {
        self.entries.insert(kind, stats);
    }

    pub fn contains(&self, kind: BotKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Статы типа; отсутствующий тип получает нейтральный профиль.
    pub fn get(&self, kind: BotKind) -> BotStats {
        match self.entries.get(&kind) {
            Some(stats) => *stats,
            None => {
                log_warning(&format!(
                    "No stats for bot kind '{}', falling back to neutral profile",
                    kind.as_str()
                ));
                BotStats::neutral()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BotKind, &BotStats)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_all_kinds() {
        let table = BotStatTable::default();
        for kind in BotKind::ALL {
            assert!(table.contains(kind));
            assert_eq!(table.get(kind), BotStats::for_kind(kind));
        }
    }

    #[test]
    fn test_missing_kind_falls_back_to_neutral() {
        let table = BotStatTable::empty();
        let stats = table.get(BotKind::Disciplined);

        assert_eq!(stats, BotStats::neutral());
        assert_eq!(stats.chase_radius, 0.0);
        assert_eq!(stats.attack_radius, 0.0);
        assert_eq!(stats.flee_radius, 0.0);
    }

    #[test]
    fn test_passive_never_attacks() {
        let stats = BotStats::for_kind(BotKind::Passive);
        assert_eq!(stats.attack_radius, 0.0);
        assert_eq!(stats.chase_radius, 0.0);
        assert!(stats.flee_radius > 0.0);
    }

    #[test]
    fn test_table_json_uses_kind_names() {
        let json = r#"{ "Passive": {
            "move_speed": 50.0, "chase_radius": 0.0, "attack_radius": 0.0,
            "flee_radius": 120.0, "wander_period": 8.0, "attack_cooldown": 999.0,
            "max_health": 40 } }"#;

        let table: BotStatTable = serde_json::from_str(json).unwrap();
        assert!(table.contains(BotKind::Passive));
        assert!(!table.contains(BotKind::AggressiveFast));
        assert_eq!(table.get(BotKind::Passive).max_health, 40);
    }
}
