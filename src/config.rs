use bevy::prelude::*;
use serde::Deserialize;

/// Tunable pacing and layout values for collectibles and the unlock sequence.
///
/// Durations are in seconds of real time, distances in world units. Every
/// field can be overridden from the `tuning` section of a level catalog.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnlockTuning {
    /// Pause between input lock and the camera leaving the player
    pub settle_delay: f32,
    pub pan_duration: f32,
    /// How long the camera holds on the item while flourish particles build up
    pub dwell_duration: f32,
    pub return_duration: f32,
    pub resume_delay: f32,
    pub audio_fade: f32,
    pub flourish_particles: u32,
    pub flourish_spread: f32,
    /// Distance at which a proxy shows its `collected/total` label
    pub counter_radius: f32,
    pub trigger_radius: f32,
    pub pickup_radius: f32,
    /// Half the visible area, used to keep scripted camera targets inside level bounds
    pub camera_half_extent: [f32; 2],
}

impl Default for UnlockTuning {
    fn default() -> Self {
        Self {
            settle_delay: 0.4,
            pan_duration: 1.2,
            dwell_duration: 1.5,
            return_duration: 1.0,
            resume_delay: 0.3,
            audio_fade: 0.5,
            flourish_particles: 180,
            flourish_spread: 24.0,
            counter_radius: 96.0,
            trigger_radius: 32.0,
            pickup_radius: 18.0,
            camera_half_extent: [320.0, 180.0],
        }
    }
}

impl UnlockTuning {
    pub fn camera_half_extent(&self) -> Vec2 {
        Vec2::from(self.camera_half_extent)
    }
}
