use bevy::prelude::*;

use crate::unlock::sequence::UnlockSequence;

/// A pending or running reveal, attached to its collectible controller
#[derive(Component, Debug)]
pub struct UnlockSequencer(pub UnlockSequence);

/// Activation point: starts the controller's sequence when the player comes within `radius`
#[derive(Component, Debug, Clone, Copy)]
pub struct UnlockTrigger {
    pub controller: Entity,
    pub radius: f32,
}
