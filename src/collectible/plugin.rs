use bevy::prelude::*;

use crate::collectible::events::*;
use crate::collectible::systems::*;
use crate::game::sets::GameSet;
use crate::scene::overlay::scene_not_frozen;
use crate::states::GameState;

pub fn plugin(app: &mut App) {
    app.add_message::<PrerequisiteCollected>()
        .add_message::<BonusCollected>()
        .add_systems(
            OnEnter(GameState::InLevel),
            (evaluate_collectibles, spawn_prerequisite_items).in_set(GameSet::Spawning),
        )
        .add_systems(
            Update,
            (collect_prerequisites, collect_bonus_items)
                .in_set(GameSet::Pickups)
                .run_if(in_state(GameState::InLevel))
                .run_if(scene_not_frozen),
        );
}
