//! AnimationClip: диапазон кадров + loop семантика.

use bevy::prelude::*;

/// Поведение клипа при выходе за границы диапазона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LoopMode {
    /// Переход на противоположную границу (idle, walk, run)
    Repeating,
    /// Остановка на граничном кадре (attack, jump, shot)
    OneShot,
}

/// Анимационный клип (frame-index state machine)
///
/// Инвариант: `first_frame <= current_frame <= last_frame` после любого `tick`.
/// Признак завершения OneShot клипа: `current_frame == last_frame`,
/// отдельного флага нет.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnimationClip {
    pub first_frame: i32,
    pub last_frame: i32,
    pub current_frame: i32,
    /// Длительность одного кадра (секунды)
    pub frame_duration: f32,
    /// Сколько осталось показывать текущий кадр (секунды)
    pub time_remaining: f32,
    /// Шаг по кадрам (может быть отрицательным для обратного проигрывания)
    pub frame_step: i32,
    pub loop_mode: LoopMode,
}

impl AnimationClip {
    pub fn new(first_frame: i32, last_frame: i32, frame_duration: f32, loop_mode: LoopMode) -> Self {
        let (first_frame, last_frame) = if first_frame <= last_frame {
            (first_frame, last_frame)
        } else {
            (last_frame, first_frame)
        };

        Self {
            first_frame,
            last_frame,
            current_frame: first_frame,
            frame_duration,
            time_remaining: frame_duration,
            frame_step: 1,
            loop_mode,
        }
    }

    pub fn repeating(first_frame: i32, last_frame: i32, frame_duration: f32) -> Self {
        Self::new(first_frame, last_frame, frame_duration, LoopMode::Repeating)
    }

    pub fn one_shot(first_frame: i32, last_frame: i32, frame_duration: f32) -> Self {
        Self::new(first_frame, last_frame, frame_duration, LoopMode::OneShot)
    }

    pub fn with_step(mut self, frame_step: i32) -> Self {
        self.frame_step = frame_step;
        self
    }

    /// Рестарт клипа с первого кадра (при входе в состояние с собственным клипом)
    pub fn reset(&mut self) {
        self.current_frame = self.first_frame;
        self.time_remaining = self.frame_duration;
    }

    /// Продвигает клип на `delta` секунд (не больше одного кадра за вызов).
    pub fn tick(&mut self, delta: f32) {
        self.time_remaining -= delta;
        if self.time_remaining > 0.0 {
            return;
        }

        self.time_remaining = self.frame_duration;
        self.current_frame += self.frame_step;

        if self.current_frame > self.last_frame {
            self.current_frame = match self.loop_mode {
                LoopMode::Repeating => self.first_frame,
                LoopMode::OneShot => self.last_frame,
            };
        } else if self.current_frame < self.first_frame {
            self.current_frame = match self.loop_mode {
                LoopMode::Repeating => self.last_frame,
                LoopMode::OneShot => self.first_frame,
            };
        }
    }

    /// OneShot клип дошёл до последнего кадра
    pub fn is_finished(&self) -> bool {
        self.loop_mode == LoopMode::OneShot && self.current_frame >= self.last_frame
    }

    pub fn frame_count(&self) -> i32 {
        self.last_frame - self.first_frame + 1
    }

    /// Source rectangle в sprite sheet (кадры лежат в один ряд).
    pub fn frame_rect(&self, frame_width: f32, frame_height: f32) -> FrameRect {
        FrameRect {
            x: self.current_frame as f32 * frame_width,
            y: 0.0,
            width: frame_width,
            height: frame_height,
        }
    }
}

/// Прямоугольник в координатах sprite sheet.
///
/// В отличие от `bevy::math::Rect` допускает отрицательную ширину:
/// рендер-слой трактует её как горизонтальное зеркалирование.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameRect {
    /// Зеркальная версия: ширина отрицательная, x сдвинут на ширину кадра.
    pub fn mirrored(self) -> Self {
        let frame_width = self.width.abs();
        Self {
            x: self.x + frame_width,
            width: -frame_width,
            ..self
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.width < 0.0
    }
}
