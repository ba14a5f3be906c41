use bevy::prelude::*;

use crate::config::UnlockTuning;
use crate::game::sets::configure_sets;
use crate::{collectible, level, player, proxy, scene, store, unlock};

/// Everything except windowing, audio output and particle rendering, so the
/// game logic also runs on a headless `App`.
pub fn plugin(app: &mut App) {
    configure_sets(app);

    // The binary may have loaded tuning from the level catalog
    app.init_resource::<UnlockTuning>().add_plugins((
        store::plugin,
        level::plugin,
        player::plugin,
        scene::plugin,
        proxy::plugin,
        collectible::plugin,
        unlock::plugin,
    ));
}
