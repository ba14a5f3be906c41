use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::level::placement::LevelCatalog;
use crate::level::resources::CurrentLevel;
use crate::level::systems::*;
use crate::states::GameState;

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<LevelCatalog>() {
        app.insert_resource(LevelCatalog::demo());
    }
    if !app.world().contains_resource::<CurrentLevel>() {
        let first = app
            .world()
            .resource::<LevelCatalog>()
            .first_map()
            .unwrap_or_default()
            .to_string();
        app.insert_resource(CurrentLevel::new(first));
    }

    app.add_systems(OnEnter(GameState::Loading), finish_loading)
        // Bounds must exist before anything in the level is placed
        .add_systems(OnEnter(GameState::InLevel), apply_level_bounds.in_set(GameSet::Setup))
        .add_systems(
            Update,
            cycle_level_input
                .in_set(GameSet::Input)
                .run_if(in_state(GameState::InLevel)),
        )
        .add_systems(OnExit(GameState::InLevel), cleanup_level.in_set(GameSet::Cleanup));
}
