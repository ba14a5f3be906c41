use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::scene::camera::{apply_camera_pan, CameraPan};
use crate::scene::overlay::SceneFreeze;
use crate::scene::particles::{expire_particle_emitters, setup_particle_registry};

/// Scene services shared by every level. Audio channels are registered
/// separately by [`crate::scene::audio::plugin`] since they need the kira plugin.
pub fn plugin(app: &mut App) {
    app.init_resource::<CameraPan>()
        .init_resource::<SceneFreeze>()
        .add_systems(Startup, setup_particle_registry)
        .add_systems(
            Update,
            (apply_camera_pan, expire_particle_emitters).in_set(GameSet::Presentation),
        );
}
