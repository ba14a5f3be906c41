use bevy::prelude::*;

use crate::collectible::decision::ControllerDecision;
use crate::prerequisite::RequirementSpec;

/// One bonus placement in the loaded level and what was decided for it on load
#[derive(Component, Debug, Clone)]
pub struct CollectibleController {
    pub spec: RequirementSpec,
    pub decision: ControllerDecision,
}

/// The real bonus item of a group
#[derive(Component, Debug, Clone)]
pub struct BonusItem {
    pub group_id: String,
}

/// Spawned but hidden and non-interactive until an unlock sequence activates it
#[derive(Component, Debug)]
pub struct Dormant;

/// Makes a bonus item collectible by touch
#[derive(Component, Debug, Clone, Copy)]
pub struct BonusPickup {
    pub radius: f32,
}

/// The collectible a member map contributes to a group
#[derive(Component, Debug, Clone)]
pub struct PrerequisiteItem {
    pub group_id: String,
    pub map_id: String,
    pub radius: f32,
}
