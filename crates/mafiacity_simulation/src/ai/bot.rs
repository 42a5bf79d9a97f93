//! Bot: AgentStateMachine одного бота.
//!
//! Вся логика живёт в методах `Bot`, ECS системы только раздают
//! кадровый delta, снимок соседей и RNG (см. `ai::systems`).
//!
//! Приоритеты решений (первое совпадение выигрывает):
//! 1. Attack: `distance < attack_radius`, cooldown истёк
//! 2. Chase: `attack_radius < distance < chase_radius`
//! 3. Flee: `distance < flee_radius` и (Passive или health < 30%)
//! 4. Idle/Wander цикл
//! 5. Иначе → Idle

use bevy::prelude::*;
use rand::Rng;

use crate::ai::state::{BehaviorState, ClipId};
use crate::ai::wander::{pick_wander_target, PatrolRoute, WanderPick, WanderState, WANDER_REACH};
use crate::animation::{AnimationClip, FrameRect};
use crate::combat::CombatTimer;
use crate::components::{Arena, BotId, BotKind, BotStats, Facing, Health};
use crate::movement::{move_away, move_toward, step_toward, Body, MoveOutcome, PeerView, Stride};

/// Ниже этой доли здоровья любой бот убегает
pub const LOW_HEALTH_FRACTION: f32 = 0.3;

/// Диапазон случайного `wander_period` при входе в Idle (секунды)
pub const IDLE_PERIOD_RANGE: (f32, f32) = (2.0, 6.0);

/// Вероятность остановиться, дойдя до wander-цели
pub const IDLE_ON_ARRIVAL_CHANCE: f64 = 0.4;

/// Разброс скорости при блуждании (доля базовой)
pub const WANDER_SPEED_JITTER: (f32, f32) = (0.3, 0.6);

/// Решение state machine для текущего кадра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Attack,
    Chase,
    Flee,
    /// Idle/Wander цикл (приоритет 4)
    Cycle,
    /// Атака ещё проигрывается, ждём конца клипа
    FinishAttack,
    ForceIdle,
}

/// Итог `Bot::tick` для событий и логов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub previous: BehaviorState,
    pub current: BehaviorState,
    /// В этом кадре запущена атака
    pub attacked: bool,
}

impl TickReport {
    fn unchanged(state: BehaviorState) -> Self {
        Self {
            previous: state,
            current: state,
            attacked: false,
        }
    }

    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Анимации бота
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct BotClips {
    pub idle_right: AnimationClip,
    pub idle_left: AnimationClip,
    pub walk: AnimationClip,
    pub run: AnimationClip,
    pub attack: AnimationClip,
}

impl Default for BotClips {
    fn default() -> Self {
        Self {
            idle_right: AnimationClip::repeating(0, 7, 0.15),
            idle_left: AnimationClip::repeating(0, 7, 0.15),
            walk: AnimationClip::repeating(0, 9, 0.15),
            run: AnimationClip::repeating(0, 9, 0.1),
            attack: AnimationClip::one_shot(0, 5, 0.1),
        }
    }
}

impl BotClips {
    pub fn get(&self, id: ClipId) -> &AnimationClip {
        match id {
            ClipId::IdleRight => &self.idle_right,
            ClipId::IdleLeft => &self.idle_left,
            ClipId::Walk => &self.walk,
            ClipId::Run => &self.run,
            ClipId::Attack => &self.attack,
        }
    }

    pub fn get_mut(&mut self, id: ClipId) -> &mut AnimationClip {
        match id {
            ClipId::IdleRight => &mut self.idle_right,
            ClipId::IdleLeft => &mut self.idle_left,
            ClipId::Walk => &mut self.walk,
            ClipId::Run => &mut self.run,
            ClipId::Attack => &mut self.attack,
        }
    }
}

/// Бот (один агент симуляции)
#[derive(Component, Debug, Clone)]
pub struct Bot {
    kind: BotKind,
    stats: BotStats,
    body: Body,
    health: Health,
    combat: CombatTimer,
    state: BehaviorState,
    previous_state: BehaviorState,
    /// Время в текущем состоянии
    state_timer: f32,
    wander_period: f32,
    wander: WanderState,
    patrol: PatrolRoute,
    attacking: bool,
    clips: BotClips,
    assets_loaded: bool,
}

impl Bot {
    pub fn new(id: BotId, kind: BotKind, stats: BotStats, position: Vec2, size: Vec2, spawn_delay: f32) -> Self {
        Self {
            kind,
            stats,
            body: Body::new(id, position, size),
            health: Health::new(stats.max_health),
            combat: CombatTimer::new(stats.attack_cooldown, spawn_delay),
            state: BehaviorState::Idle,
            previous_state: BehaviorState::Idle,
            state_timer: 0.0,
            wander_period: stats.wander_period,
            wander: WanderState {
                target: position,
                countdown: 0.0,
            },
            patrol: PatrolRoute::default(),
            attacking: false,
            clips: BotClips::default(),
            assets_loaded: true,
        }
    }

    pub fn with_patrol(mut self, waypoints: Vec<Vec2>) -> Self {
        self.patrol = PatrolRoute::new(waypoints);
        self
    }

    pub fn with_health(mut self, current: u32) -> Self {
        self.health = Health::with_current(self.health.max, current);
        self
    }

    pub fn with_assets_loaded(mut self, loaded: bool) -> Self {
        self.assets_loaded = loaded;
        self
    }

    // ========== Accessors ==========

    pub fn id(&self) -> BotId {
        self.body.id
    }

    pub fn kind(&self) -> BotKind {
        self.kind
    }

    pub fn stats(&self) -> &BotStats {
        &self.stats
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn combat(&self) -> &CombatTimer {
        &self.combat
    }

    pub fn current_state(&self) -> BehaviorState {
        self.state
    }

    pub fn previous_state(&self) -> BehaviorState {
        self.previous_state
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    pub fn wander_period(&self) -> f32 {
        self.wander_period
    }

    pub fn wander(&self) -> WanderState {
        self.wander
    }

    pub fn patrol_route(&self) -> &PatrolRoute {
        &self.patrol
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn facing(&self) -> Facing {
        self.body.facing
    }

    pub fn size(&self) -> Vec2 {
        self.body.size
    }

    /// Full-size прямоугольник спрайта (центр = позиция)
    pub fn bounds_rect(&self) -> Rect {
        self.body.bounds()
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_spawned(&self) -> bool {
        self.combat.is_spawned()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.fraction()
    }

    /// Рисовать ли бота (ассеты загружены и бот появился)
    pub fn should_render(&self) -> bool {
        self.assets_loaded && self.is_spawned()
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.body.distance_to(point)
    }

    pub fn is_in_range(&self, point: Vec2, range: f32) -> bool {
        self.distance_to(point) <= range
    }

    /// Пересечение full-size прямоугольников (касание не считается)
    pub fn collides_with_player(&self, player: Rect) -> bool {
        self.is_spawned() && !self.bounds_rect().intersect(player).is_empty()
    }

    /// Снимок для соседей (избегание)
    pub fn peer_view(&self) -> PeerView {
        self.body.peer_view(self.is_alive(), self.is_spawned())
    }

    // ========== Animation ==========

    pub fn current_clip_id(&self) -> ClipId {
        ClipId::resolve(self.state.traits().slot, self.body.facing)
    }

    pub fn current_animation_clip(&self) -> &AnimationClip {
        self.clips.get(self.current_clip_id())
    }

    pub fn frame_rect(&self, frame_width: f32, frame_height: f32) -> FrameRect {
        self.current_animation_clip().frame_rect(frame_width, frame_height)
    }

    /// `frame_rect` с зеркалированием для left-facing (кроме idle, у него свой лист)
    pub fn sprite_source(&self, frame_width: f32, frame_height: f32) -> FrameRect {
        let rect = self.frame_rect(frame_width, frame_height);
        let clip = self.current_clip_id();
        if self.body.facing == Facing::Left && !clip.has_left_sheet() {
            rect.mirrored()
        } else {
            rect
        }
    }

    // ========== Combat ==========

    /// Продвигает spawn delay и cooldown. true в кадре появления.
    pub fn advance_timers(&mut self, delta: f32) -> bool {
        self.combat.advance(delta)
    }

    /// Запускает атаку, если cooldown позволяет.
    pub fn attack(&mut self) -> bool {
        if !self.combat.can_attack(self.is_alive()) {
            return false;
        }
        self.attacking = true;
        self.combat.start_attack();
        self.clips.attack.reset();
        true
    }

    /// Урон. Возвращает true, если бот умер именно от этого удара.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health.take_damage(amount);
        was_alive && !self.is_alive()
    }

    // ========== State machine ==========

    /// Чистая функция решения по дистанции до цели и текущему состоянию.
    pub fn decide(&self, distance: f32) -> Decision {
        let stats = &self.stats;

        if stats.attack_radius > 0.0 && distance < stats.attack_radius && self.combat.can_attack(self.is_alive()) {
            return Decision::Attack;
        }

        if stats.chase_radius > 0.0 && distance > stats.attack_radius && distance < stats.chase_radius {
            return Decision::Chase;
        }

        let frightened = self.kind == BotKind::Passive
            || (self.health.current as f32) < LOW_HEALTH_FRACTION * self.health.max as f32;
        if stats.flee_radius > 0.0 && distance < stats.flee_radius && frightened {
            return Decision::Flee;
        }

        match self.state {
            BehaviorState::Idle | BehaviorState::Wandering => Decision::Cycle,
            BehaviorState::Attacking if self.attacking => Decision::FinishAttack,
            _ => Decision::ForceIdle,
        }
    }

    /// Один кадр AI.
    ///
    /// `peers` может содержать самого бота, он отсекается по id.
    /// Итоговая позиция уже прижата к `arena`.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        target: Vec2,
        delta: f32,
        peers: &[PeerView],
        arena: &Arena,
        rng: &mut R,
    ) -> TickReport {
        let previous = self.state;
        if !self.is_spawned() || !self.is_alive() {
            return TickReport::unchanged(previous);
        }

        self.state_timer += delta;
        let mut attacked = false;

        match self.decide(self.distance_to(target)) {
            Decision::Attack => {
                self.set_state(BehaviorState::Attacking, rng);
                attacked = self.attack();
            }
            Decision::Chase => {
                self.set_state(BehaviorState::Chasing, rng);
                let stride = Stride::chase(self.stats.move_speed);
                move_toward(&mut self.body, target, delta, stride, Some(peers), rng);
            }
            Decision::Flee => {
                self.set_state(BehaviorState::Fleeing, rng);
                move_away(&mut self.body, target, delta, self.stats.move_speed);
            }
            Decision::Cycle => self.idle_cycle(delta, peers, arena, rng),
            Decision::FinishAttack => {}
            Decision::ForceIdle => self.set_state(BehaviorState::Idle, rng),
        }

        // Соседи в этом же кадре видят уже прижатую к арене позицию
        self.clamp_to_arena(arena);

        TickReport {
            previous,
            current: self.state,
            attacked,
        }
    }

    fn idle_cycle<R: Rng + ?Sized>(&mut self, delta: f32, peers: &[PeerView], arena: &Arena, rng: &mut R) {
        if self.state == BehaviorState::Idle && self.state_timer >= self.wander_period {
            self.set_state(BehaviorState::Wandering, rng);
        }

        if self.state != BehaviorState::Wandering {
            return;
        }

        if self.patrol.is_empty() {
            self.wander_step(delta, peers, arena, rng);
        } else {
            self.patrol(delta);
        }

        if self.state == BehaviorState::Wandering && self.state_timer >= 2.0 * self.wander_period {
            self.set_state(BehaviorState::Idle, rng);
        }
    }

    fn wander_step<R: Rng + ?Sized>(&mut self, delta: f32, peers: &[PeerView], arena: &Arena, rng: &mut R) {
        self.wander.countdown -= delta;

        if self.wander.needs_target(self.body.position) {
            match pick_wander_target(&self.body, arena, peers, rng) {
                WanderPick::Target { position, countdown } => {
                    self.wander = WanderState {
                        target: position,
                        countdown,
                    };
                }
                WanderPick::Hold { position, countdown } => {
                    self.wander = WanderState {
                        target: position,
                        countdown,
                    };
                    self.set_state(BehaviorState::Idle, rng);
                    return;
                }
                WanderPick::Exhausted => {
                    crate::log(&format!("AI: {:?} wander search exhausted, falling back to Idle", self.id()));
                    self.set_state(BehaviorState::Idle, rng);
                    return;
                }
            }
        }

        if self.distance_to(self.wander.target) > WANDER_REACH {
            let jitter = rng.gen_range(WANDER_SPEED_JITTER.0..=WANDER_SPEED_JITTER.1);
            let stride = Stride::wander(self.stats.move_speed * jitter);
            move_toward(&mut self.body, self.wander.target, delta, stride, Some(peers), rng);
        } else if rng.gen_bool(IDLE_ON_ARRIVAL_CHANCE) {
            self.set_state(BehaviorState::Idle, rng);
        } else {
            // Новая цель в следующем кадре
            self.wander.countdown = 0.0;
        }
    }

    /// Шаг по маршруту патруля. Пустой маршрут или неактивный бот → no-op.
    pub fn patrol(&mut self, delta: f32) -> MoveOutcome {
        if !self.is_spawned() || !self.is_alive() {
            return MoveOutcome::Stationary;
        }
        let Some(waypoint) = self.patrol.steer(self.body.position) else {
            return MoveOutcome::Stationary;
        };
        step_toward(&mut self.body, waypoint, delta, Stride::patrol(self.stats.move_speed))
    }

    /// Смена состояния. Повторный вход в то же состояние ничего не сбрасывает.
    fn set_state<R: Rng + ?Sized>(&mut self, next: BehaviorState, rng: &mut R) {
        if self.state == next {
            return;
        }

        self.previous_state = self.state;
        self.state = next;
        self.state_timer = 0.0;

        if next != BehaviorState::Attacking {
            self.attacking = false;
        }

        match next {
            BehaviorState::Wandering => self.wander.countdown = 0.0,
            BehaviorState::Idle => {
                self.wander_period = rng.gen_range(IDLE_PERIOD_RANGE.0..=IDLE_PERIOD_RANGE.1);
            }
            _ => {}
        }

        if next.traits().restarts_clip {
            let clip = self.current_clip_id();
            self.clips.get_mut(clip).reset();
        }
    }

    /// Продвигает текущий клип. Конец клипа атаки возвращает бота в Idle.
    pub fn animate<R: Rng + ?Sized>(&mut self, delta: f32, rng: &mut R) -> TickReport {
        let previous = self.state;
        let clip = self.current_clip_id();
        self.clips.get_mut(clip).tick(delta);

        // Мёртвый бот замирает в последнем состоянии
        if self.state == BehaviorState::Attacking && self.is_alive() && self.clips.attack.is_finished() {
            self.set_state(BehaviorState::Idle, rng);
        }

        TickReport {
            previous,
            current: self.state,
            attacked: false,
        }
    }

    /// Frame-level clamp: спрайт целиком в арене
    pub fn clamp_to_arena(&mut self, arena: &Arena) {
        if !self.is_spawned() {
            return;
        }
        self.body.position = arena.clamp_body(self.body.position, self.body.size);
    }
}
