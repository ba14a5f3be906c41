use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::states::GameState;
use crate::store::SaveData;

/// Writes pending save changes once the level is torn down
pub fn flush_save_on_exit(mut save: ResMut<SaveData>) {
    if let Err(err) = save.flush() {
        error!("Failed to flush save data: {err}");
    }
}

/// Writes pending save changes when the app is closing
pub fn flush_save_on_app_exit(mut exits: MessageReader<AppExit>, mut save: ResMut<SaveData>) {
    if exits.read().count() == 0 {
        return;
    }
    if let Err(err) = save.flush() {
        error!("Failed to flush save data on exit: {err}");
    }
}

pub fn plugin(app: &mut App) {
    // The binary may have inserted a file-backed store already
    app.init_resource::<SaveData>()
        .add_systems(OnExit(GameState::InLevel), flush_save_on_exit.in_set(GameSet::Cleanup))
        .add_systems(Last, flush_save_on_app_exit);
}
