use bevy::prelude::*;

use crate::level::components::LevelEntity;
use crate::level::placement::LevelCatalog;
use crate::level::resources::{CurrentLevel, LevelBounds};
use crate::player::resources::PlayerControl;
use crate::states::GameState;

/// Loading has no asset work yet; move straight into the level
pub fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InLevel);
}

/// Publishes the loaded level's bounds for the camera systems
pub fn apply_level_bounds(
    mut commands: Commands,
    catalog: Res<LevelCatalog>,
    current: Res<CurrentLevel>,
) {
    match catalog.level(&current.map_id) {
        Some(level) => {
            info!("Entering map {:?}", current.map_id);
            commands.insert_resource(LevelBounds(level.bounds_rect()));
        }
        None => {
            warn!("Map {:?} is not in the level catalog", current.map_id);
            commands.remove_resource::<LevelBounds>();
        }
    }
}

/// Tab travels to the next map in the catalog. Ignored while player input is locked.
pub fn cycle_level_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    catalog: Res<LevelCatalog>,
    control: Res<PlayerControl>,
    mut current: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Tab) || !control.input_enabled {
        return;
    }

    if let Some(next_map) = catalog.next_map(&current.map_id) {
        current.map_id = next_map.to_string();
        next_state.set(GameState::Loading);
    }
}

pub fn cleanup_level(
    mut commands: Commands,
    query: Query<Entity, With<LevelEntity>>,
) {
    for entity in query.iter() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }
}
