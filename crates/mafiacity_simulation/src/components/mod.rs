//! Компоненты и типы данных, общие для всех подсистем
//!
//! - actor: здоровье и направление взгляда (Health, Facing)
//! - kind: типы ботов и stat таблица (BotKind, BotStats, BotStatTable)
//! - world: арена и отслеживаемая цель (Arena, TrackedTarget)

pub mod actor;
pub mod kind;
pub mod world;

pub use actor::*;
pub use kind::*;
pub use world::*;
