//! Frame-index анимации (AnimationScheduler)
//!
//! Общий планировщик кадров для ботов и персонажа игрока.
//! Ядро решает только какой кадр показывать; текстуры и отрисовка
//! остаются на стороне рендер-слоя.

pub mod clip;


pub use clip::{AnimationClip, FrameRect, LoopMode};
