//! Bot integration tests
//!
//! Полный App (SimulationPlugin), кадры через `step_simulation`.
//!
//! Проверяем:
//! - приоритеты решений и события смены состояния
//! - атака → Idle по концу клипа
//! - урон/смерть через события
//! - spawn delay и clamp в арену
//! - буферы событий не растут
//!
//! События стареют каждый кадр, поэтому тесты читают их через `EventCursor`
//! после каждого шага.

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use mafiacity_simulation::player::spawn_player;
use mafiacity_simulation::*;

const DT: f32 = 1.0 / 60.0;

fn create_bot_app() -> App {
    let config = SimulationConfig {
        seed: 42,
        spawn_delay: 0.0,
        ..default()
    };
    create_simulation_app(config)
}

fn spawn_test_bot(app: &mut App, id: u32, kind: BotKind, position: Vec2, spawn_delay: f32) -> Entity {
    let bot = Bot::new(
        BotId(id),
        kind,
        BotStats::for_kind(kind),
        position,
        Vec2::splat(100.0),
        spawn_delay,
    );
    app.world_mut().spawn(bot).id()
}

fn set_target(app: &mut App, target: Vec2) {
    app.world_mut().resource_mut::<TrackedTarget>().0 = target;
}

fn bot(app: &App, entity: Entity) -> &Bot {
    app.world().get::<Bot>(entity).expect("bot entity")
}

/// Копит события одного типа между кадрами
struct Recorded<E: Event> {
    cursor: EventCursor<E>,
    seen: Vec<E>,
}

impl<E: Event + Clone> Recorded<E> {
    fn new(app: &App) -> Self {
        Self {
            cursor: app.world().resource::<Events<E>>().get_cursor(),
            seen: Vec::new(),
        }
    }

    fn collect(&mut self, app: &App) {
        let events = app.world().resource::<Events<E>>();
        self.seen.extend(self.cursor.read(events).cloned());
    }
}

/// Шаг симуляции + сбор всех событий кадра
struct Recorder {
    state_changes: Recorded<BotStateChanged>,
    attacks: Recorded<AttackStarted>,
    spawned: Recorded<BotSpawned>,
    died: Recorded<BotDied>,
}

impl Recorder {
    fn new(app: &App) -> Self {
        Self {
            state_changes: Recorded::new(app),
            attacks: Recorded::new(app),
            spawned: Recorded::new(app),
            died: Recorded::new(app),
        }
    }

    fn step(&mut self, app: &mut App) {
        step_simulation(app.world_mut(), DT);
        self.state_changes.collect(app);
        self.attacks.collect(app);
        self.spawned.collect(app);
        self.died.collect(app);
    }
}

#[test]
fn test_chase_emits_state_change() {
    let mut app = create_bot_app();
    let entity = spawn_test_bot(&mut app, 1, BotKind::AggressiveFast, Vec2::new(300.0, 270.0), 0.0);
    set_target(&mut app, Vec2::new(450.0, 270.0));
    let mut recorder = Recorder::new(&app);

    recorder.step(&mut app);

    assert_eq!(bot(&app, entity).current_state(), BehaviorState::Chasing);
    assert!(bot(&app, entity).position().x > 300.0);
    assert_eq!(
        recorder.state_changes.seen,
        vec![BotStateChanged {
            bot: entity,
            from: BehaviorState::Idle,
            to: BehaviorState::Chasing,
        }]
    );
}

#[test]
fn test_attack_cycle_returns_to_idle() {
    let mut app = create_bot_app();
    // Cooldown 0.6s длиннее клипа атаки (0.5s)
    let entity = spawn_test_bot(&mut app, 1, BotKind::AggressiveFast, Vec2::new(300.0, 270.0), 0.0);
    set_target(&mut app, Vec2::new(350.0, 270.0));
    let mut recorder = Recorder::new(&app);

    recorder.step(&mut app);
    assert_eq!(bot(&app, entity).current_state(), BehaviorState::Attacking);
    assert_eq!(recorder.attacks.seen.len(), 1);
    assert_eq!(recorder.attacks.seen[0].kind, BotKind::AggressiveFast);

    // Клип атаки: 6 кадров по 0.1s
    let mut frames = 0;
    while bot(&app, entity).current_state() == BehaviorState::Attacking && frames < 120 {
        recorder.step(&mut app);
        frames += 1;
    }

    assert_eq!(bot(&app, entity).current_state(), BehaviorState::Idle);
    assert!(!bot(&app, entity).is_attacking());
    assert!((25..=40).contains(&frames), "frames = {}", frames);
    assert!(recorder
        .state_changes
        .seen
        .iter()
        .any(|change| change.from == BehaviorState::Attacking && change.to == BehaviorState::Idle));
}

#[test]
fn test_damage_kills_and_freezes_bot() {
    let mut app = create_bot_app();
    let entity = spawn_test_bot(&mut app, 1, BotKind::AggressiveFast, Vec2::new(300.0, 270.0), 0.0);
    set_target(&mut app, Vec2::new(2000.0, 270.0));
    let mut recorder = Recorder::new(&app);

    app.world_mut().send_event(DamageBot {
        target: entity,
        amount: 40,
    });
    recorder.step(&mut app);
    assert_eq!(bot(&app, entity).health().current, 60);
    assert!(app.world().get::<Dead>(entity).is_none());

    app.world_mut().send_event(DamageBot {
        target: entity,
        amount: 150,
    });
    recorder.step(&mut app);

    let dead = bot(&app, entity);
    assert_eq!(dead.health().current, 0);
    assert!(!dead.is_alive());
    assert!(app.world().get::<Dead>(entity).is_some());
    assert_eq!(recorder.died.seen.len(), 1);
    assert_eq!(recorder.died.seen[0].bot, entity);

    // Мёртвый бот игнорирует цель рядом
    let frozen_at = dead.position();
    let frozen_state = dead.current_state();
    set_target(&mut app, Vec2::new(320.0, 270.0));
    for _ in 0..60 {
        recorder.step(&mut app);
    }
    assert_eq!(bot(&app, entity).position(), frozen_at);
    assert_eq!(bot(&app, entity).current_state(), frozen_state);
    assert!(recorder.attacks.seen.is_empty());
    assert_eq!(recorder.died.seen.len(), 1);
}

#[test]
fn test_spawn_delay_gates_ai() {
    let mut app = create_bot_app();
    let entity = spawn_test_bot(&mut app, 1, BotKind::AggressiveFast, Vec2::new(300.0, 270.0), 0.5);
    set_target(&mut app, Vec2::new(340.0, 270.0));
    let mut recorder = Recorder::new(&app);

    // 0.5s = 30 кадров при 60Hz, запас на накопление float
    for _ in 0..25 {
        recorder.step(&mut app);
    }
    assert!(!bot(&app, entity).is_spawned());
    assert_eq!(bot(&app, entity).current_state(), BehaviorState::Idle);
    assert!(!bot(&app, entity).should_render());

    for _ in 0..10 {
        recorder.step(&mut app);
    }
    assert!(bot(&app, entity).is_spawned());
    assert_eq!(recorder.spawned.seen.len(), 1);
    assert_eq!(recorder.spawned.seen[0].bot, entity);
    assert!(!recorder.attacks.seen.is_empty());
}

#[test]
fn test_fleeing_bot_is_clamped_to_arena() {
    let mut app = create_bot_app();
    let entity = spawn_test_bot(&mut app, 1, BotKind::Passive, Vec2::new(120.0, 270.0), 0.0);
    // Цель остаётся внутри flee radius и у прижатого к краю бота
    set_target(&mut app, Vec2::new(150.0, 270.0));

    for _ in 0..120 {
        step_simulation(app.world_mut(), DT);
    }

    let fled = bot(&app, entity);
    assert_eq!(fled.current_state(), BehaviorState::Fleeing);
    // Половина спрайта (50) от левого края
    assert_eq!(fled.position().x, 50.0);
    assert_eq!(fled.facing(), Facing::Left);
}

#[test]
fn test_player_position_drives_bots() {
    let mut app = create_bot_app();
    let bot_entity = spawn_test_bot(&mut app, 1, BotKind::AggressiveTough, Vec2::new(300.0, 270.0), 0.0);
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, Vec2::new(500.0, 270.0), Vec2::splat(128.0))
    };
    app.world_mut().flush();

    step_simulation(app.world_mut(), DT);

    assert_eq!(app.world().resource::<TrackedTarget>().0, Vec2::new(500.0, 270.0));
    assert_eq!(bot(&app, bot_entity).current_state(), BehaviorState::Chasing);

    // Игрок уходит вправо, цель обновляется в том же кадре
    app.world_mut().get_mut::<PlayerIntent>(player).expect("intent").horizontal = 1.0;
    step_simulation(app.world_mut(), DT);

    let target = app.world().resource::<TrackedTarget>().0;
    assert_eq!(target, app.world().get::<PlayerCharacter>(player).expect("player").position);
    assert!(target.x > 500.0);
}

#[test]
fn test_crowd_keeps_invariants() {
    let mut app = create_bot_app();
    let entities = populate(app.world_mut(), 10);
    assert_eq!(entities.len(), 10);

    let arena = *app.world().resource::<Arena>();
    for frame in 0..600 {
        let x = 480.0 + 300.0 * ((frame as f32) * 0.01).sin();
        set_target(&mut app, Vec2::new(x, 400.0));
        step_simulation(app.world_mut(), DT);

        for entity in &entities {
            let current = bot(&app, *entity);
            let health = current.health();
            assert!(health.current <= health.max);

            let clip = current.current_animation_clip();
            assert!(clip.current_frame >= clip.first_frame && clip.current_frame <= clip.last_frame);

            let half = current.size() * 0.5;
            let p = current.position();
            assert!(p.x >= half.x && p.x <= arena.width - half.x, "{:?}", p);
            assert!(p.y >= half.y && p.y <= arena.height - half.y, "{:?}", p);
        }
    }
}

#[test]
fn test_event_buffers_stay_bounded() {
    let mut app = create_bot_app();
    let bot_count = 10;
    populate(app.world_mut(), bot_count);
    let mut recorder = Recorder::new(&app);

    // Не больше двух переходов на бота за кадр (tick + animate), событие живёт два кадра
    let bound = bot_count * 2 * 2;
    for frame in 0..3000 {
        let x = 480.0 + 300.0 * ((frame as f32) * 0.01).sin();
        set_target(&mut app, Vec2::new(x, 400.0));
        recorder.step(&mut app);

        let buffered = app.world().resource::<Events<BotStateChanged>>().len();
        assert!(buffered <= bound, "frame {}: {} buffered", frame, buffered);
    }

    assert!(recorder.state_changes.seen.len() > bound);
}
