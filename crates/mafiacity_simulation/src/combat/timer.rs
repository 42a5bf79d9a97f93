//! CombatTimer: attack cooldown + spawn delay
//!
//! Пример жизненного цикла:
//! - бот создан с `spawn_delay = 15s`, AI неактивен
//! - через 15s `is_spawned` становится true (навсегда)
//! - каждая атака сбрасывает cooldown к per-kind значению

use bevy::prelude::*;

/// Таймеры боя и появления бота
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CombatTimer {
    /// Cooldown между атаками (секунды, per-kind)
    pub attack_cooldown: f32,
    /// Текущий cooldown таймер (уменьшается до 0)
    pub cooldown_remaining: f32,
    /// Сколько осталось до появления (секунды)
    pub spawn_delay_remaining: f32,
    spawned: bool,
}

impl CombatTimer {
    pub fn new(attack_cooldown: f32, spawn_delay: f32) -> Self {
        let spawn_delay = spawn_delay.max(0.0);
        Self {
            attack_cooldown,
            cooldown_remaining: 0.0,
            spawn_delay_remaining: spawn_delay,
            spawned: spawn_delay <= 0.0,
        }
    }

    /// Продвигает таймеры на `delta`.
    ///
    /// Возвращает true только в кадре, когда бот появился.
    pub fn advance(&mut self, delta: f32) -> bool {
        self.cooldown_remaining = (self.cooldown_remaining - delta).max(0.0);

        if self.spawned {
            return false;
        }

        self.spawn_delay_remaining = (self.spawn_delay_remaining - delta).max(0.0);
        if self.spawn_delay_remaining <= 0.0 {
            self.spawned = true;
            return true;
        }
        false
    }

    /// Флаг монотонный: false → true, обратно не сбрасывается
    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    /// Может ли атаковать (cooldown истёк, жив, заспавнен)
    pub fn can_attack(&self, alive: bool) -> bool {
        self.cooldown_remaining <= 0.0 && alive && self.spawned
    }

    /// Начать атаку (сбросить cooldown)
    pub fn start_attack(&mut self) {
        self.cooldown_remaining = self.attack_cooldown;
    }
}
