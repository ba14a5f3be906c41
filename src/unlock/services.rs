use bevy::math::curve::EaseFunction;
use bevy::prelude::*;

use crate::scene::audio::AudioBus;
use crate::scene::particles::ParticleKind;

/// Host scene services an unlock sequence drives.
///
/// The game implements this with [`crate::scene::host::SceneHost`]; tests use a
/// recording implementation. Every call is fire-and-forget: the sequence paces
/// itself with its own timers rather than waiting on the host.
pub trait SceneServices {
    fn pause_bus(&mut self, bus: AudioBus);
    fn resume_bus(&mut self, bus: AudioBus);
    fn pan_camera_to(&mut self, target: Vec2, duration: f32, easing: EaseFunction);
    fn spawn_particles(&mut self, kind: ParticleKind, count: u32, position: Vec2, spread: f32) -> Entity;
    /// Despawns an entity if it still exists
    fn despawn(&mut self, entity: Entity);
    /// Turns a dormant bonus item into an ordinary interactive pickup
    fn activate_item(&mut self, entity: Entity);
    fn freeze(&mut self);
    /// Lifts the freeze and returns the camera to player follow
    fn unfreeze(&mut self);
    fn set_player_input(&mut self, enabled: bool);
}

/// Every call a [`SceneServices`] implementation received
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    PauseBus(AudioBus),
    ResumeBus(AudioBus),
    PanCamera(Vec2, f32),
    SpawnParticles(ParticleKind, u32, Vec2),
    Despawn(Entity),
    ActivateItem(Entity),
    Freeze,
    Unfreeze,
    PlayerInput(bool),
}

/// Records calls in order; spawned emitters get fresh placeholder ids
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingServices {
    pub calls: Vec<SceneCall>,
    next_emitter: u32,
}

#[cfg(test)]
impl RecordingServices {
    pub fn count(&self, predicate: impl Fn(&SceneCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn position(&self, call: &SceneCall) -> Option<usize> {
        self.calls.iter().position(|recorded| recorded == call)
    }
}

#[cfg(test)]
impl SceneServices for RecordingServices {
    fn pause_bus(&mut self, bus: AudioBus) {
        self.calls.push(SceneCall::PauseBus(bus));
    }

    fn resume_bus(&mut self, bus: AudioBus) {
        self.calls.push(SceneCall::ResumeBus(bus));
    }

    fn pan_camera_to(&mut self, target: Vec2, duration: f32, _easing: EaseFunction) {
        self.calls.push(SceneCall::PanCamera(target, duration));
    }

    fn spawn_particles(&mut self, kind: ParticleKind, count: u32, position: Vec2, _spread: f32) -> Entity {
        self.calls.push(SceneCall::SpawnParticles(kind, count, position));
        self.next_emitter += 1;
        Entity::from_bits(1000 + self.next_emitter as u64)
    }

    fn despawn(&mut self, entity: Entity) {
        self.calls.push(SceneCall::Despawn(entity));
    }

    fn activate_item(&mut self, entity: Entity) {
        self.calls.push(SceneCall::ActivateItem(entity));
    }

    fn freeze(&mut self) {
        self.calls.push(SceneCall::Freeze);
    }

    fn unfreeze(&mut self) {
        self.calls.push(SceneCall::Unfreeze);
    }

    fn set_player_input(&mut self, enabled: bool) {
        self.calls.push(SceneCall::PlayerInput(enabled));
    }
}
