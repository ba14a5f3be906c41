use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::player::resources::PlayerControl;
use crate::player::systems::*;
use crate::states::GameState;

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerControl>()
        .add_systems(OnEnter(GameState::InLevel), spawn_player.in_set(GameSet::Spawning))
        .add_systems(
            Update,
            (player_movement, camera_follow_player)
                .chain()
                .in_set(GameSet::Movement)
                .run_if(in_state(GameState::InLevel)),
        );
}
