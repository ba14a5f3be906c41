use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::UnlockTuning;
use crate::level::components::LevelEntity;
use crate::player::components::Player;
use crate::proxy::components::*;
use crate::proxy::state::ProxyState;

const PROXY_SIZE: f32 = 22.0;
const LABEL_OFFSET: f32 = 24.0;
const LABEL_FONT_SIZE: f32 = 14.0;
const BOB_AMPLITUDE: f32 = 3.0;
const BOB_SPEED: f32 = 2.5;

/// Spawns a proxy with its (initially hidden) counter label
pub fn spawn_proxy(commands: &mut Commands, group_id: &str, state: ProxyState, position: Vec2) -> Entity {
    let phase = rand::thread_rng().gen_range(0.0..TAU);

    commands
        .spawn((
            CollectibleProxy {
                group_id: group_id.to_string(),
                state,
            },
            ProxyBob { origin: position, phase },
            LevelEntity,
            Sprite::from_color(state.color(), Vec2::splat(PROXY_SIZE)),
            Transform::from_translation(position.extend(0.8)),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                ProxyCounterLabel,
                Text2d::new(state.label()),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, LABEL_OFFSET, 0.1),
                Visibility::Hidden,
            ));
        })
        .id()
}

/// Shows each proxy's label only while the player is within the counter radius
pub fn update_proxy_labels(
    tuning: Res<UnlockTuning>,
    player_query: Query<&Transform, With<Player>>,
    proxy_query: Query<&Transform, With<CollectibleProxy>>,
    mut label_query: Query<(&ChildOf, &mut Visibility), With<ProxyCounterLabel>>,
) {
    let player_pos = player_query.single().ok().map(|t| t.translation.truncate());

    for (child_of, mut visibility) in label_query.iter_mut() {
        let in_range = match (player_pos, proxy_query.get(child_of.parent())) {
            (Some(player_pos), Ok(proxy)) => {
                player_pos.distance(proxy.translation.truncate()) <= tuning.counter_radius
            }
            _ => false,
        };

        let wanted = if in_range { Visibility::Inherited } else { Visibility::Hidden };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

pub fn animate_proxy_bob(time: Res<Time>, mut query: Query<(&ProxyBob, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (bob, mut transform) in query.iter_mut() {
        transform.translation.x = bob.origin.x;
        transform.translation.y = bob.origin.y + BOB_AMPLITUDE * (t * BOB_SPEED + bob.phase).sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prerequisite::CounterResult;
    use bevy::ecs::system::RunSystemOnce;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<UnlockTuning>();
        app
    }

    fn spawn_test_proxy(app: &mut App, position: Vec2) -> Entity {
        let state = ProxyState::from(CounterResult::new(3, 1));
        app.world_mut()
            .run_system_once(move |mut commands: Commands| spawn_proxy(&mut commands, "G1", state, position))
            .unwrap()
    }

    fn label_visibility(app: &mut App) -> Visibility {
        let mut query = app
            .world_mut()
            .query_filtered::<&Visibility, With<ProxyCounterLabel>>();
        *query.single(app.world()).unwrap()
    }

    #[test]
    fn test_spawn_proxy_with_label() {
        let mut app = setup_test_app();
        let proxy = spawn_test_proxy(&mut app, Vec2::new(600.0, 200.0));

        let component = app.world().get::<CollectibleProxy>(proxy).unwrap();
        assert_eq!(component.group_id, "G1");
        assert_eq!(component.state.label(), "2/3");
        assert!(app.world().get::<LevelEntity>(proxy).is_some());

        let mut labels = app.world_mut().query::<(&Text2d, &ChildOf)>();
        let (text, child_of) = labels.single(app.world()).unwrap();
        assert_eq!(text.0, "2/3");
        assert_eq!(child_of.parent(), proxy);
    }

    #[test]
    fn test_label_hidden_when_player_far() {
        let mut app = setup_test_app();
        spawn_test_proxy(&mut app, Vec2::new(600.0, 200.0));
        app.world_mut()
            .spawn((Player::default(), Transform::from_xyz(0.0, 0.0, 0.0)));

        let _ = app.world_mut().run_system_once(update_proxy_labels);

        assert_eq!(label_visibility(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_label_shown_when_player_near() {
        let mut app = setup_test_app();
        spawn_test_proxy(&mut app, Vec2::new(600.0, 200.0));
        app.world_mut()
            .spawn((Player::default(), Transform::from_xyz(560.0, 200.0, 0.0)));

        let _ = app.world_mut().run_system_once(update_proxy_labels);

        assert_eq!(label_visibility(&mut app), Visibility::Inherited);
    }

    #[test]
    fn test_label_hidden_without_player() {
        let mut app = setup_test_app();
        spawn_test_proxy(&mut app, Vec2::ZERO);

        let _ = app.world_mut().run_system_once(update_proxy_labels);

        assert_eq!(label_visibility(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_bob_stays_near_origin() {
        let mut app = setup_test_app();
        app.add_plugins(bevy::time::TimePlugin);
        let proxy = spawn_test_proxy(&mut app, Vec2::new(10.0, 20.0));

        let _ = app.world_mut().run_system_once(animate_proxy_bob);

        let transform = app.world().get::<Transform>(proxy).unwrap();
        assert_eq!(transform.translation.x, 10.0);
        assert!((transform.translation.y - 20.0).abs() <= BOB_AMPLITUDE);
    }
}
