//! Movement domain: тело бота, локальное избегание столкновений, шаг движения
//!
//! Содержит:
//! - Body (позиция центра, размер спрайта, facing)
//! - CollisionAvoidance: `would_collide`, `avoidance_direction`
//! - MovementResolver: `move_toward`, `step_toward`, `move_away`
//!
//! Clamp позиции в границы арены делается отдельной frame-level системой,
//! не здесь.

pub mod avoidance;
pub mod body;
pub mod resolver;

#[cfg(test)]
mod resolver_tests;

pub use avoidance::{
    avoidance_direction, hitbox, random_direction, rects_touch, would_collide, PeerView, HITBOX_SCALE,
};
pub use body::Body;
pub use resolver::{
    move_away, move_toward, step_toward, MoveOutcome, Stride, FACING_DEAD_ZONE, FLEE_SPEED_MULTIPLIER,
};
