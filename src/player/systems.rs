use bevy::prelude::*;

use crate::level::components::LevelEntity;
use crate::level::placement::LevelCatalog;
use crate::level::resources::CurrentLevel;
use crate::player::components::*;
use crate::player::resources::PlayerControl;
use crate::scene::camera::CameraPan;

const PLAYER_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const PLAYER_SIZE: f32 = 20.0;

/// Spawns the player at the level's spawn point, and a camera if none exists yet
pub fn spawn_player(
    mut commands: Commands,
    catalog: Res<LevelCatalog>,
    current: Res<CurrentLevel>,
    camera_query: Query<Entity, With<Camera>>,
) {
    // Reuse existing camera if available, otherwise spawn new one
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }

    let spawn = catalog
        .level(&current.map_id)
        .map(|level| level.spawn_position())
        .unwrap_or_default();

    commands.spawn((
        Player::default(),
        LevelEntity,
        Sprite::from_color(PLAYER_COLOR, Vec2::splat(PLAYER_SIZE)),
        Transform::from_translation(spawn.extend(1.0)),
    ));
}

/// WASD / arrow key movement, ignored while input is locked
pub fn player_movement(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    control: Res<PlayerControl>,
    mut player_query: Query<(&mut Transform, &Player)>,
    time: Res<Time>,
) {
    if !control.input_enabled {
        return;
    }

    let mut direction = Vec2::ZERO;
    if keyboard_input.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }

    if direction == Vec2::ZERO {
        return;
    }

    let direction = direction.normalize();
    for (mut transform, player) in player_query.iter_mut() {
        let movement = direction * player.speed * time.delta_secs();
        transform.translation += movement.extend(0.0);
    }
}

/// Keeps the camera centered on the player unless a scripted pan owns it
pub fn camera_follow_player(
    camera_pan: Res<CameraPan>,
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera>, Without<Player>)>,
) {
    if camera_pan.is_scripted() {
        return;
    }

    if let Ok(player_transform) = player_query.single() {
        for mut camera_transform in camera_query.iter_mut() {
            camera_transform.translation.x = player_transform.translation.x;
            camera_transform.translation.y = player_transform.translation.y;
        }
    }
}
