//! Player module: персонаж игрока и цель для ботов
//!
//! Системы игрока идут до ботов: боты в этом же кадре видят
//! уже обновлённую позицию через `TrackedTarget`.

use bevy::prelude::*;

pub mod character;

pub use character::{JumpState, PlayerCharacter, PlayerClipId, PlayerClips, PlayerIntent};

use crate::components::TrackedTarget;
use crate::SimulationSet;

/// Система: intent → движение, прыжок, выстрел, гравитация
pub fn drive_player(mut players: Query<(&PlayerIntent, &mut PlayerCharacter)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (intent, mut player) in players.iter_mut() {
        player.apply_intent(intent, delta);
        player.integrate(delta);
    }
}

/// Система: клипы игрока
pub fn animate_player(mut players: Query<&mut PlayerCharacter>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut player in players.iter_mut() {
        player.animate(delta);
    }
}

/// Система: позиция игрока → `TrackedTarget`
pub fn publish_tracked_target(players: Query<&PlayerCharacter>, mut target: ResMut<TrackedTarget>) {
    let Ok(player) = players.single() else {
        return;
    };
    target.0 = player.position;
}

/// Spawn helper для игрока (персонаж + пустой intent)
pub fn spawn_player(commands: &mut Commands, position: Vec2, size: Vec2) -> Entity {
    commands
        .spawn((PlayerCharacter::new(position, size), PlayerIntent::default()))
        .id()
}

/// Player Plugin
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrackedTarget>();

        app.add_systems(
            FixedUpdate,
            (drive_player, animate_player, publish_tracked_target)
                .chain()
                .in_set(SimulationSet::Player),
        );
    }
}
