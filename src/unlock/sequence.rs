use bevy::math::curve::EaseFunction;
use bevy::prelude::*;

use crate::config::UnlockTuning;
use crate::prerequisite::RequirementSpec;
use crate::scene::audio::AudioBus;
use crate::scene::particles::ParticleKind;
use crate::store::SaveStore;
use crate::unlock::phase::SequencePhase;
use crate::unlock::services::SceneServices;

const PAN_EASING: EaseFunction = EaseFunction::CubicInOut;

/// Pacing of one reveal, taken from [`UnlockTuning`] when the sequence is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceTiming {
    pub settle_delay: f32,
    pub pan_duration: f32,
    pub dwell_duration: f32,
    pub return_duration: f32,
    pub resume_delay: f32,
    pub flourish_particles: u32,
    pub flourish_spread: f32,
}

impl From<&UnlockTuning> for SequenceTiming {
    fn from(tuning: &UnlockTuning) -> Self {
        Self {
            settle_delay: tuning.settle_delay,
            pan_duration: tuning.pan_duration,
            dwell_duration: tuning.dwell_duration,
            return_duration: tuning.return_duration,
            resume_delay: tuning.resume_delay,
            flourish_particles: tuning.flourish_particles,
            flourish_spread: tuning.flourish_spread,
        }
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::from(&UnlockTuning::default())
    }
}

/// Host state the sequence has taken over and must hand back
#[derive(Debug, Default, Clone, Copy)]
struct HeldResources {
    input_locked: bool,
    buses_paused: bool,
    frozen: bool,
}

/// The one-time reveal of a bonus item.
///
/// Driven by [`UnlockSequence::advance`] once per frame. Each call makes at most
/// one phase transition, and only when the current phase's timer has run out,
/// so no phase is ever skipped. The unlock marker is written on entering
/// [`SequencePhase::Commit`] and nowhere else.
#[derive(Debug)]
pub struct UnlockSequence {
    group_id: String,
    marker_key: String,
    proxy: Entity,
    item: Entity,
    item_position: Vec2,
    return_to: Vec2,
    timing: SequenceTiming,
    phase: SequencePhase,
    elapsed: f32,
    skipping: bool,
    committed: bool,
    emitters: Vec<Entity>,
    held: HeldResources,
}

impl UnlockSequence {
    pub fn new(
        spec: &RequirementSpec,
        proxy: Entity,
        item: Entity,
        item_position: Vec2,
        timing: SequenceTiming,
    ) -> Self {
        Self {
            group_id: spec.group_id().to_string(),
            marker_key: spec.marker_key(),
            proxy,
            item,
            item_position,
            return_to: item_position,
            timing,
            phase: SequencePhase::Idle,
            elapsed: 0.0,
            skipping: false,
            committed: false,
            emitters: Vec::new(),
            held: HeldResources::default(),
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    pub fn proxy(&self) -> Entity {
        self.proxy
    }

    pub fn item(&self) -> Entity {
        self.item
    }

    /// True once the Commit phase has run
    pub fn has_committed(&self) -> bool {
        self.committed
    }

    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Starts the reveal: locks input and fades the audio buses.
    ///
    /// `return_to` is where the camera goes back to afterwards. Returns false if
    /// the sequence was already started.
    pub fn trigger(&mut self, return_to: Vec2, host: &mut dyn SceneServices) -> bool {
        if self.phase != SequencePhase::Idle {
            return false;
        }

        self.return_to = return_to;
        self.phase = SequencePhase::PlayerControlSuspended;
        self.elapsed = 0.0;

        host.set_player_input(false);
        self.held.input_locked = true;
        for bus in AudioBus::ALL {
            host.pause_bus(bus);
        }
        self.held.buses_paused = true;

        info!("Unlock sequence started for group {:?}", self.group_id);
        true
    }

    /// Shrinks every remaining phase to zero length. Commit still runs.
    pub fn skip(&mut self) -> bool {
        if !self.phase.is_running() || self.skipping {
            return false;
        }
        self.skipping = true;
        true
    }

    /// Advances the phase timer by `dt` seconds and makes at most one transition
    pub fn advance(&mut self, dt: f32, host: &mut dyn SceneServices, store: &mut dyn SaveStore) -> SequencePhase {
        if !self.phase.is_running() {
            return self.phase;
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed < self.phase_duration(self.phase) {
            return self.phase;
        }

        let next = self.phase.next();
        self.enter(next, host, store);
        self.phase
    }

    /// Releases everything the sequence holds and ends it without committing.
    ///
    /// Used when the scene goes away mid-sequence. Safe to call on any phase and
    /// more than once; never touches the store.
    pub fn teardown(&mut self, host: &mut dyn SceneServices) {
        if self.phase == SequencePhase::Done {
            return;
        }

        if self.phase.is_running() && !self.committed {
            info!(
                "Unlock sequence for group {:?} interrupted before commit; it will replay on next load",
                self.group_id
            );
        }

        self.release(host);
        self.phase = SequencePhase::Done;
    }

    fn phase_duration(&self, phase: SequencePhase) -> f32 {
        if self.skipping {
            return 0.0;
        }
        match phase {
            SequencePhase::PlayerControlSuspended => self.timing.settle_delay,
            SequencePhase::CameraFraming => self.timing.pan_duration,
            SequencePhase::Flourish => self.timing.dwell_duration,
            SequencePhase::CameraReturn => self.timing.return_duration,
            SequencePhase::Resuming => self.timing.resume_delay,
            SequencePhase::Idle | SequencePhase::Commit | SequencePhase::Done => 0.0,
        }
    }

    fn enter(&mut self, next: SequencePhase, host: &mut dyn SceneServices, store: &mut dyn SaveStore) {
        self.phase = next;
        self.elapsed = 0.0;

        match next {
            SequencePhase::CameraFraming => {
                host.freeze();
                self.held.frozen = true;
                let emitter = host.spawn_particles(
                    ParticleKind::Flourish,
                    self.timing.flourish_particles,
                    self.item_position,
                    self.timing.flourish_spread,
                );
                self.emitters.push(emitter);
                host.pan_camera_to(self.item_position, self.phase_duration(next), PAN_EASING);
            }
            SequencePhase::Commit => self.commit(host, store),
            SequencePhase::CameraReturn => {
                host.pan_camera_to(self.return_to, self.phase_duration(next), PAN_EASING);
            }
            SequencePhase::Resuming => self.release(host),
            SequencePhase::Idle
            | SequencePhase::PlayerControlSuspended
            | SequencePhase::Flourish
            | SequencePhase::Done => {}
        }
    }

    fn commit(&mut self, host: &mut dyn SceneServices, store: &mut dyn SaveStore) {
        host.despawn(self.proxy);
        host.activate_item(self.item);

        match store.set_flag(&self.marker_key, true) {
            Ok(()) => info!("Unlock committed for group {:?}", self.group_id),
            Err(err) => error!(
                "Failed to write unlock marker {:?}: {err}; the reveal will replay on next load",
                self.marker_key
            ),
        }
        self.committed = true;
    }

    fn release(&mut self, host: &mut dyn SceneServices) {
        for emitter in self.emitters.drain(..) {
            host.despawn(emitter);
        }
        if self.held.frozen {
            host.unfreeze();
            self.held.frozen = false;
        }
        if self.held.buses_paused {
            for bus in AudioBus::ALL {
                host.resume_bus(bus);
            }
            self.held.buses_paused = false;
        }
        if self.held.input_locked {
            host.set_player_input(true);
            self.held.input_locked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::unlock::services::{RecordingServices, SceneCall};

    const PROXY: u64 = 10;
    const ITEM: u64 = 11;

    fn spec() -> RequirementSpec {
        RequirementSpec::new("G1", ["A", "B", "C"], None)
    }

    fn new_sequence() -> UnlockSequence {
        UnlockSequence::new(
            &spec(),
            Entity::from_bits(PROXY),
            Entity::from_bits(ITEM),
            Vec2::new(600.0, 200.0),
            SequenceTiming::default(),
        )
    }

    fn marker(store: &MemoryStore) -> bool {
        store.get_flag(&spec().marker_key()).unwrap()
    }

    /// Advances in small steps until `Done`, returning every phase observed
    fn run_to_done(
        sequence: &mut UnlockSequence,
        host: &mut RecordingServices,
        store: &mut MemoryStore,
    ) -> Vec<(SequencePhase, bool)> {
        let mut observed = Vec::new();
        for _ in 0..10_000 {
            let phase = sequence.advance(1.0 / 60.0, host, store);
            observed.push((phase, marker(store)));
            if phase == SequencePhase::Done {
                break;
            }
        }
        observed
    }

    #[test]
    fn test_idle_sequence_does_not_advance() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();

        assert_eq!(sequence.advance(10.0, &mut host, &mut store), SequencePhase::Idle);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_trigger_locks_input_and_pauses_buses() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();

        assert!(sequence.trigger(Vec2::ZERO, &mut host));
        assert_eq!(sequence.phase(), SequencePhase::PlayerControlSuspended);
        assert_eq!(
            host.calls,
            vec![
                SceneCall::PlayerInput(false),
                SceneCall::PauseBus(AudioBus::Music),
                SceneCall::PauseBus(AudioBus::Sfx),
            ]
        );

        // A second trigger is ignored
        assert!(!sequence.trigger(Vec2::ZERO, &mut host));
        assert_eq!(host.calls.len(), 3);
    }

    #[test]
    fn test_phases_visited_in_order_without_skipping() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);

        let observed = run_to_done(&mut sequence, &mut host, &mut store);

        let mut distinct: Vec<SequencePhase> = vec![SequencePhase::PlayerControlSuspended];
        for (phase, _) in &observed {
            if distinct.last() != Some(phase) {
                distinct.push(*phase);
            }
        }
        assert_eq!(distinct, SequencePhase::ORDER[1..].to_vec());
    }

    #[test]
    fn test_one_transition_per_advance_even_with_large_dt() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);

        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::CameraFraming);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::Flourish);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::Commit);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::CameraReturn);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::Resuming);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::Done);
        assert_eq!(sequence.advance(100.0, &mut host, &mut store), SequencePhase::Done);
    }

    #[test]
    fn test_marker_false_before_commit_true_from_commit() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        assert!(!marker(&store));

        for (phase, marker_set) in run_to_done(&mut sequence, &mut host, &mut store) {
            if phase < SequencePhase::Commit {
                assert!(!marker_set, "marker set early in {phase:?}");
            } else {
                assert!(marker_set, "marker missing in {phase:?}");
            }
        }
        assert!(sequence.has_committed());
    }

    #[test]
    fn test_commit_removes_proxy_and_activates_item() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        run_to_done(&mut sequence, &mut host, &mut store);

        let despawn_proxy = host.position(&SceneCall::Despawn(Entity::from_bits(PROXY))).unwrap();
        let activate = host.position(&SceneCall::ActivateItem(Entity::from_bits(ITEM))).unwrap();
        let unfreeze = host.position(&SceneCall::Unfreeze).unwrap();
        assert!(despawn_proxy < unfreeze);
        assert!(activate < unfreeze);
        assert_eq!(host.count(|call| matches!(call, SceneCall::ActivateItem(_))), 1);
    }

    #[test]
    fn test_camera_frames_item_then_returns_to_player() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        let player = Vec2::new(-40.0, 10.0);
        sequence.trigger(player, &mut host);
        run_to_done(&mut sequence, &mut host, &mut store);

        let pans: Vec<&SceneCall> = host
            .calls
            .iter()
            .filter(|call| matches!(call, SceneCall::PanCamera(..)))
            .collect();
        let timing = SequenceTiming::default();
        assert_eq!(
            pans,
            vec![
                &SceneCall::PanCamera(Vec2::new(600.0, 200.0), timing.pan_duration),
                &SceneCall::PanCamera(player, timing.return_duration),
            ]
        );
    }

    #[test]
    fn test_all_resources_released_by_done() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        run_to_done(&mut sequence, &mut host, &mut store);

        assert_eq!(host.count(|c| matches!(c, SceneCall::PauseBus(_))), 2);
        assert_eq!(host.count(|c| matches!(c, SceneCall::ResumeBus(_))), 2);
        assert_eq!(host.count(|c| *c == SceneCall::Freeze), 1);
        assert_eq!(host.count(|c| *c == SceneCall::Unfreeze), 1);
        assert_eq!(host.calls.last(), Some(&SceneCall::PlayerInput(true)));
        // The flourish emitter is despawned along with the proxy
        assert_eq!(host.count(|c| matches!(c, SceneCall::Despawn(_))), 2);
    }

    #[test]
    fn test_skip_during_suspended_still_commits() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        assert!(sequence.skip());

        let observed = run_to_done(&mut sequence, &mut host, &mut store);

        // Every phase after the trigger takes exactly one advance
        assert_eq!(observed.len(), 6);
        assert!(observed.iter().any(|(phase, _)| *phase == SequencePhase::Commit));
        assert!(marker(&store));
        assert!(host.position(&SceneCall::Despawn(Entity::from_bits(PROXY))).is_some());
        assert_eq!(sequence.phase(), SequencePhase::Done);
    }

    #[test]
    fn test_skip_uses_instant_pans() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        sequence.skip();
        run_to_done(&mut sequence, &mut host, &mut store);

        for call in &host.calls {
            if let SceneCall::PanCamera(_, duration) = call {
                assert_eq!(*duration, 0.0);
            }
        }
    }

    #[test]
    fn test_skip_ignored_when_idle_or_done() {
        let mut sequence = new_sequence();
        assert!(!sequence.skip());

        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        run_to_done(&mut sequence, &mut host, &mut store);
        assert!(!sequence.skip());
    }

    #[test]
    fn test_teardown_before_commit_leaves_store_untouched() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        sequence.advance(1.0, &mut host, &mut store);
        sequence.advance(2.0, &mut host, &mut store);
        assert_eq!(sequence.phase(), SequencePhase::Flourish);

        sequence.teardown(&mut host);

        assert_eq!(sequence.phase(), SequencePhase::Done);
        assert!(!sequence.has_committed());
        assert!(!marker(&store));
        assert!(store.data().flags.is_empty());
        assert_eq!(host.count(|c| *c == SceneCall::Unfreeze), 1);
        assert_eq!(host.count(|c| matches!(c, SceneCall::ResumeBus(_))), 2);
        assert_eq!(host.calls.last(), Some(&SceneCall::PlayerInput(true)));
        assert!(host.position(&SceneCall::ActivateItem(Entity::from_bits(ITEM))).is_none());
    }

    #[test]
    fn test_teardown_after_commit_keeps_marker() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::new();
        sequence.trigger(Vec2::ZERO, &mut host);
        while sequence.phase() != SequencePhase::CameraReturn {
            sequence.advance(5.0, &mut host, &mut store);
        }

        sequence.teardown(&mut host);

        assert!(marker(&store));
        assert!(sequence.has_committed());
        assert_eq!(host.count(|c| *c == SceneCall::Unfreeze), 1);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        sequence.trigger(Vec2::ZERO, &mut host);

        sequence.teardown(&mut host);
        let calls_after_first = host.calls.len();
        sequence.teardown(&mut host);

        assert_eq!(host.calls.len(), calls_after_first);
        // Never frozen, so nothing to unfreeze
        assert_eq!(host.count(|c| *c == SceneCall::Unfreeze), 0);
    }

    #[test]
    fn test_replayed_marker_write_is_unchanged() {
        let mut store = MemoryStore::new();
        let key = spec().marker_key();

        store.set_flag(&key, true).unwrap();
        let before = store.data().clone();
        store.set_flag(&key, true).unwrap();

        assert!(store.get_flag(&key).unwrap());
        assert_eq!(store.data(), &before);
    }

    #[test]
    fn test_commit_with_unavailable_store_still_finishes() {
        let mut sequence = new_sequence();
        let mut host = RecordingServices::default();
        let mut store = MemoryStore::unavailable();
        sequence.trigger(Vec2::ZERO, &mut host);

        let mut phase = sequence.phase();
        for _ in 0..10 {
            phase = sequence.advance(5.0, &mut host, &mut store);
        }

        assert_eq!(phase, SequencePhase::Done);
        assert!(sequence.has_committed());
        assert_eq!(host.calls.last(), Some(&SceneCall::PlayerInput(true)));
    }
}
