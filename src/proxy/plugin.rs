use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::proxy::systems::*;
use crate::scene::overlay::scene_not_frozen;
use crate::states::GameState;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            update_proxy_labels,
            animate_proxy_bob.run_if(scene_not_frozen),
        )
            .in_set(GameSet::Presentation)
            .run_if(in_state(GameState::InLevel)),
    );
}
