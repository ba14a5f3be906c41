use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::states::GameState;
use crate::unlock::events::*;
use crate::unlock::systems::*;

pub fn plugin(app: &mut App) {
    app.add_message::<UnlockStarted>()
        .add_message::<UnlockCommitted>()
        .add_message::<UnlockFinished>()
        .add_systems(
            Update,
            (
                skip_unlock_sequences.in_set(GameSet::Input),
                detect_unlock_triggers.in_set(GameSet::Pickups),
                drive_unlock_sequences.in_set(GameSet::Sequence),
            )
                .run_if(in_state(GameState::InLevel)),
        )
        .add_systems(
            OnExit(GameState::InLevel),
            teardown_unlock_sequences.in_set(GameSet::Teardown),
        );
}
