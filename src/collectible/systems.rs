use bevy::prelude::*;

use crate::collectible::components::*;
use crate::collectible::decision::{decide, ControllerDecision};
use crate::collectible::events::*;
use crate::config::UnlockTuning;
use crate::level::components::LevelEntity;
use crate::level::placement::{BonusPlacement, LevelCatalog};
use crate::level::resources::CurrentLevel;
use crate::player::components::Player;
use crate::prerequisite::count;
use crate::proxy::systems::spawn_proxy;
use crate::scene::particles::{spawn_emitter, ParticleKind, ParticleRegistry};
use crate::store::keys::{bonus_collected_key, collection_count_key, collection_key};
use crate::store::{SaveData, SaveStore};
use crate::unlock::components::{UnlockSequencer, UnlockTrigger};
use crate::unlock::sequence::{SequenceTiming, UnlockSequence};

const BONUS_COLOR: Color = Color::srgb(1.0, 0.85, 0.3);
const BONUS_SIZE: f32 = 22.0;
const PREREQUISITE_COLOR: Color = Color::srgb(0.4, 0.8, 1.0);
const PREREQUISITE_SIZE: f32 = 14.0;
const PICKUP_BURST_PARTICLES: u32 = 40;
const PICKUP_BURST_SPREAD: f32 = 12.0;

/// Spawns a bonus item, either dormant (hidden, no pickup) or as an ordinary pickup
pub fn spawn_bonus_item(commands: &mut Commands, group_id: &str, position: Vec2, pickup: Option<BonusPickup>) -> Entity {
    let mut item = commands.spawn((
        BonusItem {
            group_id: group_id.to_string(),
        },
        LevelEntity,
        Sprite::from_color(BONUS_COLOR, Vec2::splat(BONUS_SIZE)),
        Transform::from_translation(position.extend(0.9)),
    ));
    match pickup {
        Some(pickup) => item.insert((pickup, Visibility::Visible)),
        None => item.insert((Dormant, Visibility::Hidden)),
    };
    item.id()
}

/// Reads a flag, logging and falling back to `false` when the store fails
fn read_flag(store: &dyn SaveStore, key: &str) -> bool {
    store.get_flag(key).unwrap_or_else(|err| {
        warn!("Could not read save flag {key:?}: {err}");
        false
    })
}

fn evaluate_bonus(
    commands: &mut Commands,
    placement: &BonusPlacement,
    store: &dyn SaveStore,
    tuning: &UnlockTuning,
) {
    let spec = placement.requirement();
    let position = placement.item_position();

    let bonus_collected = read_flag(store, &bonus_collected_key(spec.group_id()));
    let counter = count(spec, store);
    let marker = store.get_flag(&spec.marker_key());
    if let Err(err) = &marker {
        warn!("Could not read unlock marker {:?}: {err}", spec.marker_key());
    }

    let decision = decide(counter, marker, bonus_collected);
    info!(
        "Bonus {:?}: {}/{} collected, {:?}",
        spec.group_id(),
        counter.collected(),
        counter.total,
        decision
    );

    let controller = commands
        .spawn((
            CollectibleController {
                spec: spec.clone(),
                decision,
            },
            LevelEntity,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id();

    match decision {
        ControllerDecision::ShowProgress(state) => {
            spawn_proxy(commands, spec.group_id(), state, position);
        }
        ControllerDecision::AwaitingReveal(state) => {
            let proxy = spawn_proxy(commands, spec.group_id(), state, position);
            let item = spawn_bonus_item(commands, spec.group_id(), position, None);
            let sequence = UnlockSequence::new(spec, proxy, item, position, SequenceTiming::from(tuning));
            commands.entity(controller).insert(UnlockSequencer(sequence));
            commands.spawn((
                UnlockTrigger {
                    controller,
                    radius: tuning.trigger_radius,
                },
                LevelEntity,
                Transform::from_translation(placement.trigger_position().extend(0.0)),
            ));
        }
        ControllerDecision::Revealed => {
            let pickup = BonusPickup {
                radius: tuning.pickup_radius,
            };
            spawn_bonus_item(commands, spec.group_id(), position, Some(pickup));
        }
        ControllerDecision::Collected => {}
    }
}

/// Decides and spawns every bonus of the level being entered. Never writes the store.
pub fn evaluate_collectibles(
    mut commands: Commands,
    catalog: Res<LevelCatalog>,
    current: Res<CurrentLevel>,
    tuning: Res<UnlockTuning>,
    save: Res<SaveData>,
) {
    let Some(level) = catalog.level(&current.map_id) else {
        warn!("Map {:?} is not in the level catalog", current.map_id);
        return;
    };

    for placement in &level.bonuses {
        evaluate_bonus(&mut commands, placement, save.store(), &tuning);
    }
}

/// Spawns the prerequisite items this map contributes, skipping ones already collected
pub fn spawn_prerequisite_items(
    mut commands: Commands,
    catalog: Res<LevelCatalog>,
    current: Res<CurrentLevel>,
    tuning: Res<UnlockTuning>,
    save: Res<SaveData>,
) {
    let Some(level) = catalog.level(&current.map_id) else {
        return;
    };

    for placement in &level.prerequisites {
        let key = collection_key(&placement.group_id, &level.map_id);
        if read_flag(save.store(), &key) {
            continue;
        }

        commands.spawn((
            PrerequisiteItem {
                group_id: placement.group_id.clone(),
                map_id: level.map_id.clone(),
                radius: tuning.pickup_radius,
            },
            LevelEntity,
            Sprite::from_color(PREREQUISITE_COLOR, Vec2::splat(PREREQUISITE_SIZE)),
            Transform::from_translation(Vec2::from(placement.position).extend(0.5)),
        ));
    }
}

/// Records a prerequisite as collected when the player touches it
pub fn collect_prerequisites(
    mut commands: Commands,
    player_query: Query<&Transform, With<Player>>,
    item_query: Query<(Entity, &Transform, &PrerequisiteItem)>,
    mut save: ResMut<SaveData>,
    registry: Option<Res<ParticleRegistry>>,
    mut collected: MessageWriter<PrerequisiteCollected>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform, item) in item_query.iter() {
        let item_pos = transform.translation.truncate();
        if player_pos.distance(item_pos) > item.radius {
            continue;
        }

        let store = save.store_mut();
        let key = collection_key(&item.group_id, &item.map_id);
        if let Err(err) = store.set_flag(&key, true) {
            // Left in place so the pickup can be retried
            error!("Failed to record prerequisite {key:?}: {err}");
            continue;
        }

        let count_key = collection_count_key(&item.group_id);
        let total = store.get_counter(&count_key).and_then(|n| store.set_counter(&count_key, n + 1));
        if let Err(err) = total {
            warn!("Failed to bump pickup counter {count_key:?}: {err}");
        }

        info!("Collected prerequisite {:?} on map {:?}", item.group_id, item.map_id);
        spawn_emitter(
            &mut commands,
            registry.as_deref(),
            ParticleKind::PickupBurst,
            PICKUP_BURST_PARTICLES,
            item_pos,
            PICKUP_BURST_SPREAD,
        );
        commands.entity(entity).despawn();
        collected.write(PrerequisiteCollected {
            group_id: item.group_id.clone(),
            map_id: item.map_id.clone(),
        });
    }
}

/// Picks up interactive bonus items; dormant ones are ignored
pub fn collect_bonus_items(
    mut commands: Commands,
    player_query: Query<&Transform, With<Player>>,
    item_query: Query<(Entity, &Transform, &BonusItem, &BonusPickup), Without<Dormant>>,
    mut save: ResMut<SaveData>,
    registry: Option<Res<ParticleRegistry>>,
    mut collected: MessageWriter<BonusCollected>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform, item, pickup) in item_query.iter() {
        let item_pos = transform.translation.truncate();
        if player_pos.distance(item_pos) > pickup.radius {
            continue;
        }

        let key = bonus_collected_key(&item.group_id);
        if let Err(err) = save.set_flag(&key, true) {
            error!("Failed to record bonus pickup {key:?}: {err}");
            continue;
        }

        info!("Collected bonus item {:?}", item.group_id);
        spawn_emitter(
            &mut commands,
            registry.as_deref(),
            ParticleKind::PickupBurst,
            PICKUP_BURST_PARTICLES,
            item_pos,
            PICKUP_BURST_SPREAD,
        );
        commands.entity(entity).despawn();
        collected.write(BonusCollected {
            group_id: item.group_id.clone(),
        });
    }
}
