use bevy::prelude::*;

use crate::player::components::Player;
use crate::scene::host::SceneHost;
use crate::store::SaveData;
use crate::unlock::components::*;
use crate::unlock::events::*;
use crate::unlock::phase::SequencePhase;
use crate::unlock::services::SceneServices;

/// Starts a controller's sequence once the player reaches its trigger
pub fn detect_unlock_triggers(
    mut host: SceneHost,
    player_query: Query<&Transform, With<Player>>,
    trigger_query: Query<(Entity, &Transform, &UnlockTrigger)>,
    mut sequencers: Query<&mut UnlockSequencer>,
    mut started: MessageWriter<UnlockStarted>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (trigger_entity, trigger_transform, trigger) in trigger_query.iter() {
        if player_pos.distance(trigger_transform.translation.truncate()) > trigger.radius {
            continue;
        }

        // Triggers fire once
        host.despawn(trigger_entity);

        let Ok(mut sequencer) = sequencers.get_mut(trigger.controller) else {
            warn!("Unlock trigger {trigger_entity} has no sequencer on {}", trigger.controller);
            continue;
        };
        if sequencer.0.trigger(player_pos, &mut host) {
            started.write(UnlockStarted {
                group_id: sequencer.0.group_id().to_string(),
            });
        }
    }
}

/// Advances running sequences on real time and retires finished ones
pub fn drive_unlock_sequences(
    time: Res<Time<Real>>,
    mut host: SceneHost,
    mut save: ResMut<SaveData>,
    mut sequencers: Query<(Entity, &mut UnlockSequencer)>,
    mut committed: MessageWriter<UnlockCommitted>,
    mut finished: MessageWriter<UnlockFinished>,
) {
    let dt = time.delta_secs();

    for (entity, mut sequencer) in sequencers.iter_mut() {
        let sequence = &mut sequencer.0;
        if !sequence.is_running() {
            continue;
        }

        let before = sequence.phase();
        let phase = sequence.advance(dt, &mut host, save.store_mut());
        if phase == before {
            continue;
        }
        debug!("Unlock sequence {:?}: {before:?} -> {phase:?}", sequence.group_id());

        match phase {
            SequencePhase::Commit => {
                committed.write(UnlockCommitted {
                    group_id: sequence.group_id().to_string(),
                });
            }
            SequencePhase::Done => {
                info!("Unlock sequence finished for group {:?}", sequence.group_id());
                finished.write(UnlockFinished {
                    group_id: sequence.group_id().to_string(),
                });
                host.commands.entity(entity).remove::<UnlockSequencer>();
            }
            _ => {}
        }
    }
}

/// Space or Escape fast-forwards every running sequence
pub fn skip_unlock_sequences(keyboard_input: Res<ButtonInput<KeyCode>>, mut sequencers: Query<&mut UnlockSequencer>) {
    if !keyboard_input.any_just_pressed([KeyCode::Space, KeyCode::Escape]) {
        return;
    }

    for mut sequencer in sequencers.iter_mut() {
        if sequencer.0.skip() {
            info!("Skipping unlock sequence for group {:?}", sequencer.0.group_id());
        }
    }
}

/// Releases whatever running sequences still hold when the level goes away
pub fn teardown_unlock_sequences(mut host: SceneHost, mut sequencers: Query<&mut UnlockSequencer>) {
    for mut sequencer in sequencers.iter_mut() {
        sequencer.0.teardown(&mut host);
    }
}
