use bevy::prelude::*;

/// Message fired when the player reaches an unlock trigger
#[derive(Message, Debug, Clone)]
pub struct UnlockStarted {
    pub group_id: String,
}

/// Message fired on the frame an unlock marker is committed
#[derive(Message, Debug, Clone)]
pub struct UnlockCommitted {
    pub group_id: String,
}

/// Message fired when a sequence has handed everything back to the player
#[derive(Message, Debug, Clone)]
pub struct UnlockFinished {
    pub group_id: String,
}
