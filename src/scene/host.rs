use bevy::ecs::system::SystemParam;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::collectible::components::{BonusPickup, Dormant};
use crate::config::UnlockTuning;
use crate::level::resources::LevelBounds;
use crate::player::resources::PlayerControl;
use crate::scene::audio::*;
use crate::scene::camera::CameraPan;
use crate::scene::overlay::{spawn_freeze_overlay, SceneFreeze};
use crate::scene::particles::{spawn_emitter, ParticleKind, ParticleRegistry};
use crate::unlock::services::SceneServices;

/// The running game's [`SceneServices`].
///
/// Audio channels and the particle registry are optional so the sequencer also
/// runs headless (no audio or hanabi plugin); the calls then become no-ops apart
/// from the bookkeeping entities.
#[derive(SystemParam)]
pub struct SceneHost<'w, 's> {
    pub commands: Commands<'w, 's>,
    camera_pan: ResMut<'w, CameraPan>,
    freeze: ResMut<'w, SceneFreeze>,
    control: ResMut<'w, PlayerControl>,
    tuning: Res<'w, UnlockTuning>,
    bounds: Option<Res<'w, LevelBounds>>,
    particles: Option<Res<'w, ParticleRegistry>>,
    music: Option<Res<'w, AudioChannel<MusicChannel>>>,
    sfx: Option<Res<'w, AudioChannel<SfxChannel>>>,
}

impl SceneServices for SceneHost<'_, '_> {
    fn pause_bus(&mut self, bus: AudioBus) {
        let fade = self.tuning.audio_fade;
        match bus {
            AudioBus::Music => {
                if let Some(channel) = &self.music {
                    fade_out_channel::<MusicChannel>(channel, fade);
                }
            }
            AudioBus::Sfx => {
                if let Some(channel) = &self.sfx {
                    fade_out_channel::<SfxChannel>(channel, fade);
                }
            }
        }
    }

    fn resume_bus(&mut self, bus: AudioBus) {
        let fade = self.tuning.audio_fade;
        match bus {
            AudioBus::Music => {
                if let Some(channel) = &self.music {
                    fade_in_channel::<MusicChannel>(channel, fade);
                }
            }
            AudioBus::Sfx => {
                if let Some(channel) = &self.sfx {
                    fade_in_channel::<SfxChannel>(channel, fade);
                }
            }
        }
    }

    fn pan_camera_to(&mut self, target: Vec2, duration: f32, easing: EaseFunction) {
        let target = match &self.bounds {
            Some(bounds) => bounds.clamp_camera_target(target, self.tuning.camera_half_extent()),
            None => target,
        };
        self.camera_pan.start(target, duration, easing);
    }

    fn spawn_particles(&mut self, kind: ParticleKind, count: u32, position: Vec2, spread: f32) -> Entity {
        spawn_emitter(
            &mut self.commands,
            self.particles.as_deref(),
            kind,
            count,
            position,
            spread,
        )
    }

    fn despawn(&mut self, entity: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(entity) {
            entity.try_despawn();
        }
    }

    fn activate_item(&mut self, entity: Entity) {
        let radius = self.tuning.pickup_radius;
        if let Ok(mut entity) = self.commands.get_entity(entity) {
            entity
                .try_remove::<Dormant>()
                .try_insert((BonusPickup { radius }, Visibility::Visible));
        }
    }

    fn freeze(&mut self) {
        if self.freeze.frozen {
            return;
        }
        let overlay = spawn_freeze_overlay(&mut self.commands);
        self.freeze.frozen = true;
        self.freeze.overlay = Some(overlay);
    }

    fn unfreeze(&mut self) {
        if let Some(overlay) = self.freeze.overlay.take() {
            self.despawn(overlay);
        }
        self.freeze.frozen = false;
        self.camera_pan.release();
    }

    fn set_player_input(&mut self, enabled: bool) {
        self.control.input_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectible::components::BonusItem;
    use crate::scene::overlay::FreezeOverlay;
    use bevy::ecs::system::RunSystemOnce;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<CameraPan>()
            .init_resource::<SceneFreeze>()
            .init_resource::<PlayerControl>()
            .init_resource::<UnlockTuning>();
        app
    }

    #[test]
    fn test_freeze_and_unfreeze_manage_overlay() {
        let mut app = setup_test_app();

        let _ = app.world_mut().run_system_once(|mut host: SceneHost| host.freeze());
        assert!(app.world().resource::<SceneFreeze>().frozen);
        let mut overlays = app.world_mut().query::<&FreezeOverlay>();
        assert_eq!(overlays.iter(app.world()).count(), 1);

        // A second freeze does not stack overlays
        let _ = app.world_mut().run_system_once(|mut host: SceneHost| host.freeze());
        assert_eq!(overlays.iter(app.world()).count(), 1);

        let _ = app.world_mut().run_system_once(|mut host: SceneHost| host.unfreeze());
        let freeze = app.world().resource::<SceneFreeze>();
        assert!(!freeze.frozen);
        assert!(freeze.overlay.is_none());
        assert_eq!(overlays.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_unfreeze_releases_camera() {
        let mut app = setup_test_app();
        let _ = app.world_mut().run_system_once(|mut host: SceneHost| {
            host.freeze();
            host.pan_camera_to(Vec2::new(10.0, 0.0), 1.0, EaseFunction::CubicInOut);
        });
        assert!(app.world().resource::<CameraPan>().is_scripted());

        let _ = app.world_mut().run_system_once(|mut host: SceneHost| host.unfreeze());
        assert!(!app.world().resource::<CameraPan>().is_scripted());
    }

    #[test]
    fn test_pan_target_clamped_to_level_bounds() {
        let mut app = setup_test_app();
        app.insert_resource(LevelBounds(Rect::new(-500.0, -300.0, 500.0, 300.0)));

        let _ = app.world_mut().run_system_once(|mut host: SceneHost| {
            host.pan_camera_to(Vec2::new(480.0, 290.0), 1.0, EaseFunction::CubicInOut);
        });

        let half = UnlockTuning::default().camera_half_extent();
        let target = app.world().resource::<CameraPan>().target().unwrap();
        assert_eq!(target, Vec2::new(500.0 - half.x, 300.0 - half.y));
    }

    #[test]
    fn test_set_player_input() {
        let mut app = setup_test_app();
        let _ = app
            .world_mut()
            .run_system_once(|mut host: SceneHost| host.set_player_input(false));
        assert!(!app.world().resource::<PlayerControl>().input_enabled);
    }

    #[test]
    fn test_activate_item_makes_it_interactive() {
        let mut app = setup_test_app();
        let item = app
            .world_mut()
            .spawn((BonusItem { group_id: "G1".into() }, Dormant, Visibility::Hidden))
            .id();

        let _ = app
            .world_mut()
            .run_system_once(move |mut host: SceneHost| host.activate_item(item));

        assert!(app.world().get::<Dormant>(item).is_none());
        assert!(app.world().get::<BonusPickup>(item).is_some());
        assert_eq!(app.world().get::<Visibility>(item), Some(&Visibility::Visible));
    }

    #[test]
    fn test_despawn_missing_entity_is_harmless() {
        let mut app = setup_test_app();
        let entity = app.world_mut().spawn_empty().id();
        app.world_mut().despawn(entity);

        let result = app
            .world_mut()
            .run_system_once(move |mut host: SceneHost| host.despawn(entity));
        assert!(result.is_ok());
    }

    #[test]
    fn test_audio_calls_without_channels_are_noops() {
        let mut app = setup_test_app();
        let result = app.world_mut().run_system_once(|mut host: SceneHost| {
            for bus in AudioBus::ALL {
                host.pause_bus(bus);
                host.resume_bus(bus);
            }
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_spawn_particles_creates_emitter() {
        let mut app = setup_test_app();
        let emitter = app
            .world_mut()
            .run_system_once(|mut host: SceneHost| {
                host.spawn_particles(ParticleKind::Flourish, 120, Vec2::new(5.0, 5.0), 24.0)
            })
            .unwrap();

        assert!(app
            .world()
            .get::<crate::scene::particles::ParticleEmitter>(emitter)
            .is_some());
    }
}
