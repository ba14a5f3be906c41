use bevy::prelude::*;

const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.05, 0.55);

/// Marker for the darkening overlay shown while the scene is frozen
#[derive(Component)]
pub struct FreezeOverlay;

/// Whether gameplay is frozen, and the overlay entity that shows it
#[derive(Resource, Debug, Default)]
pub struct SceneFreeze {
    pub frozen: bool,
    pub overlay: Option<Entity>,
}

/// Run condition for gameplay systems that must stop during a freeze
pub fn scene_not_frozen(freeze: Option<Res<SceneFreeze>>) -> bool {
    freeze.map_or(true, |freeze| !freeze.frozen)
}

pub fn spawn_freeze_overlay(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            FreezeOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(OVERLAY_COLOR),
            // Under any HUD, over the world
            GlobalZIndex(-1),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_scene_freeze_default_is_unfrozen() {
        let freeze = SceneFreeze::default();
        assert!(!freeze.frozen);
        assert!(freeze.overlay.is_none());
    }

    #[test]
    fn test_scene_not_frozen_condition() {
        let mut app = App::new();
        assert!(app.world_mut().run_system_once(scene_not_frozen).unwrap());

        app.insert_resource(SceneFreeze { frozen: true, overlay: None });
        assert!(!app.world_mut().run_system_once(scene_not_frozen).unwrap());
    }

    #[test]
    fn test_spawn_freeze_overlay() {
        let mut app = App::new();
        let _ = app.world_mut().run_system_once(|mut commands: Commands| {
            spawn_freeze_overlay(&mut commands);
        });

        let mut query = app.world_mut().query::<&FreezeOverlay>();
        assert_eq!(query.iter(app.world()).count(), 1);
    }
}
