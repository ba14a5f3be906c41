use bevy::prelude::*;

/// Marker for entities that belong to the loaded level and despawn with it
#[derive(Component, Debug, Default)]
pub struct LevelEntity;
