//! PlayerCharacter: кинематика игрока + его клипы
//!
//! Ядро не читает клавиатуру: внешний input слой пишет `PlayerIntent`,
//! `drive_player` применяет его к персонажу.
//!
//! Ось Y направлена вниз (экранные координаты), прыжок = отрицательная скорость.

use bevy::prelude::*;

use crate::animation::{AnimationClip, FrameRect};
use crate::components::Facing;

/// Намерение игрока на текущий кадр
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerIntent {
    /// -1 влево, 1 вправо, 0 стоим
    pub horizontal: f32,
    pub jump: bool,
    pub fire: bool,
}

/// Вертикальная кинематика прыжка
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct JumpState {
    /// Вертикальная скорость (ед/сек, вниз положительная)
    pub velocity: f32,
    /// Ускорение вниз (ед/сек²)
    pub gravity: f32,
    /// Начальная скорость прыжка
    pub jump_speed: f32,
    /// Линия земли (y позиции на земле)
    pub ground_y: f32,
    pub on_ground: bool,
}

impl JumpState {
    pub fn grounded_at(ground_y: f32) -> Self {
        Self {
            velocity: 0.0,
            gravity: 2880.0,
            jump_speed: 900.0,
            ground_y,
            on_ground: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PlayerClipId {
    IdleRight,
    IdleLeft,
    Walk,
    Jump,
    Shot,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PlayerClips {
    pub idle_right: AnimationClip,
    pub idle_left: AnimationClip,
    pub walk: AnimationClip,
    pub jump: AnimationClip,
    pub shot: AnimationClip,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle_right: AnimationClip::repeating(0, 4, 0.15),
            idle_left: AnimationClip::repeating(0, 4, 0.15),
            walk: AnimationClip::repeating(0, 5, 0.08),
            jump: AnimationClip::one_shot(0, 9, 0.1),
            shot: AnimationClip::one_shot(0, 4, 0.05),
        }
    }
}

impl PlayerClips {
    pub fn get(&self, id: PlayerClipId) -> &AnimationClip {
        match id {
            PlayerClipId::IdleRight => &self.idle_right,
            PlayerClipId::IdleLeft => &self.idle_left,
            PlayerClipId::Walk => &self.walk,
            PlayerClipId::Jump => &self.jump,
            PlayerClipId::Shot => &self.shot,
        }
    }

    pub fn get_mut(&mut self, id: PlayerClipId) -> &mut AnimationClip {
        match id {
            PlayerClipId::IdleRight => &mut self.idle_right,
            PlayerClipId::IdleLeft => &mut self.idle_left,
            PlayerClipId::Walk => &mut self.walk,
            PlayerClipId::Jump => &mut self.jump,
            PlayerClipId::Shot => &mut self.shot,
        }
    }
}

/// Персонаж игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerCharacter {
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Скорость ходьбы (ед/сек)
    pub walk_speed: f32,
    pub walking: bool,
    pub jump: JumpState,
    pub fire_cooldown: f32,
    pub fire_timer: f32,
    pub firing: bool,
    pub clips: PlayerClips,
}

impl PlayerCharacter {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            facing: Facing::Right,
            walk_speed: 120.0,
            walking: false,
            jump: JumpState::grounded_at(position.y),
            fire_cooldown: 0.3,
            fire_timer: 0.0,
            firing: false,
            clips: PlayerClips::default(),
        }
    }

    pub fn is_jumping(&self) -> bool {
        !self.jump.on_ground
    }

    pub fn bounds_rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// Применяет намерение: шаг по X, старт прыжка, старт выстрела.
    pub fn apply_intent(&mut self, intent: &PlayerIntent, delta: f32) {
        let dx = intent.horizontal.clamp(-1.0, 1.0) * self.walk_speed * delta;
        self.position.x += dx;
        self.walking = dx != 0.0;
        if dx != 0.0 {
            self.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
        }

        if intent.jump && self.jump.on_ground {
            self.jump.on_ground = false;
            self.jump.velocity = -self.jump.jump_speed;
            self.clips.jump.reset();
        }

        // Пока идёт выстрел, новый не начинаем
        if intent.fire && !self.firing {
            self.firing = true;
            self.fire_timer = self.fire_cooldown;
            self.clips.shot.reset();
        }
    }

    /// Гравитация до приземления + таймер выстрела.
    pub fn integrate(&mut self, delta: f32) {
        if self.is_jumping() {
            self.jump.velocity += self.jump.gravity * delta;
            self.position.y += self.jump.velocity * delta;

            if self.position.y >= self.jump.ground_y {
                self.position.y = self.jump.ground_y;
                self.jump.velocity = 0.0;
                self.jump.on_ground = true;
            }
        }

        if self.firing {
            self.fire_timer -= delta;
            if self.fire_timer <= 0.0 {
                self.firing = false;
                self.clips.shot.reset();
            }
        }
    }

    /// Приоритет клипов: Shot > Jump > Walk > Idle
    pub fn current_clip_id(&self) -> PlayerClipId {
        if self.firing {
            PlayerClipId::Shot
        } else if self.is_jumping() {
            PlayerClipId::Jump
        } else if self.walking {
            PlayerClipId::Walk
        } else {
            match self.facing {
                Facing::Right => PlayerClipId::IdleRight,
                Facing::Left => PlayerClipId::IdleLeft,
            }
        }
    }

    pub fn current_clip(&self) -> &AnimationClip {
        self.clips.get(self.current_clip_id())
    }

    pub fn animate(&mut self, delta: f32) {
        let id = self.current_clip_id();
        self.clips.get_mut(id).tick(delta);
    }

    /// Кадр с зеркалированием для left-facing (у idle свой left-лист)
    pub fn sprite_source(&self, frame_width: f32, frame_height: f32) -> FrameRect {
        let id = self.current_clip_id();
        let rect = self.clips.get(id).frame_rect(frame_width, frame_height);
        let idle = matches!(id, PlayerClipId::IdleRight | PlayerClipId::IdleLeft);
        if self.facing == Facing::Left && !idle {
            rect.mirrored()
        } else {
            rect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn player() -> PlayerCharacter {
        PlayerCharacter::new(Vec2::new(200.0, 400.0), Vec2::splat(128.0))
    }

    #[test]
    fn test_walk_updates_facing_and_clip() {
        let mut player = player();
        assert_eq!(player.current_clip_id(), PlayerClipId::IdleRight);

        player.apply_intent(&PlayerIntent { horizontal: -1.0, ..default() }, 0.5);
        assert_relative_eq!(player.position.x, 140.0);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.current_clip_id(), PlayerClipId::Walk);
        assert!(player.sprite_source(128.0, 128.0).is_mirrored());

        player.apply_intent(&PlayerIntent::default(), 0.5);
        assert_eq!(player.current_clip_id(), PlayerClipId::IdleLeft);
        assert!(!player.sprite_source(128.0, 128.0).is_mirrored());
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let mut player = player();
        player.apply_intent(&PlayerIntent { jump: true, ..default() }, 1.0 / 60.0);
        assert!(player.is_jumping());
        assert_eq!(player.current_clip_id(), PlayerClipId::Jump);

        // Повторный прыжок в воздухе игнорируется
        let velocity = player.jump.velocity;
        player.apply_intent(&PlayerIntent { jump: true, ..default() }, 0.0);
        assert_eq!(player.jump.velocity, velocity);

        let mut apex = player.position.y;
        for _ in 0..120 {
            player.integrate(1.0 / 60.0);
            apex = apex.min(player.position.y);
        }
        assert!(apex < 400.0);
        assert!(!player.is_jumping());
        assert_eq!(player.position.y, 400.0);
        assert_eq!(player.jump.velocity, 0.0);
    }

    #[test]
    fn test_fire_has_priority_and_expires() {
        let mut player = player();
        player.apply_intent(&PlayerIntent { fire: true, jump: true, ..default() }, 1.0 / 60.0);
        assert!(player.firing);
        assert_eq!(player.current_clip_id(), PlayerClipId::Shot);

        // Выстрел длится fire_cooldown, потом сбрасывается
        player.integrate(0.2);
        assert!(player.firing);
        player.integrate(0.2);
        assert!(!player.firing);
        assert_eq!(player.clips.shot.current_frame, 0);
    }

    #[test]
    fn test_fire_is_not_retriggered_while_firing() {
        let mut player = player();
        player.apply_intent(&PlayerIntent { fire: true, ..default() }, 0.0);
        player.integrate(0.1);
        player.apply_intent(&PlayerIntent { fire: true, ..default() }, 0.0);
        assert_relative_eq!(player.fire_timer, 0.2, epsilon = 1e-6);
    }
}
