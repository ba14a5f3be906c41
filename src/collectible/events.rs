use bevy::prelude::*;

/// Message fired when the player picks up a member map's prerequisite item
#[derive(Message, Debug, Clone)]
pub struct PrerequisiteCollected {
    pub group_id: String,
    pub map_id: String,
}

/// Message fired when the player picks up a revealed bonus item
#[derive(Message, Debug, Clone)]
pub struct BonusCollected {
    pub group_id: String,
}
