use bevy::prelude::*;

/// Whether the player currently accepts movement input.
/// Unlock sequences lock input for their whole duration.
#[derive(Resource, Debug)]
pub struct PlayerControl {
    pub input_enabled: bool,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self { input_enabled: true }
    }
}
