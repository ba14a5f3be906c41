use bevy::prelude::*;

use crate::proxy::state::ProxyState;

/// Non-interactive stand-in showing how close a bonus is to unlocking
#[derive(Component, Debug, Clone)]
pub struct CollectibleProxy {
    pub group_id: String,
    pub state: ProxyState,
}

/// The `collected/total` text above a proxy
#[derive(Component, Debug)]
pub struct ProxyCounterLabel;

/// Idle hover animation
#[derive(Component, Debug, Clone, Copy)]
pub struct ProxyBob {
    pub origin: Vec2,
    pub phase: f32,
}
