use bevy::prelude::*;

use crate::states::GameState;

/// System sets for explicit ordering of game systems.
/// These sets allow systems to be grouped and ordered relative to each other.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Level entry - resources describing the level (runs in OnEnter)
    Setup,
    /// Level entry - player, collectibles, proxies (runs in OnEnter)
    Spawning,
    /// Input handling - keyboard, mouse, etc.
    Input,
    /// Movement systems - player and camera follow
    Movement,
    /// Pickup detection and unlock triggers
    Pickups,
    /// Scripted unlock sequences
    Sequence,
    /// View-only updates - proxies, labels, camera pans, particles
    Presentation,
    /// Level exit - release anything still owned by a running sequence (runs in OnExit)
    Teardown,
    /// Level exit - despawn level entities (runs in OnExit)
    Cleanup,
}

pub fn configure_sets(app: &mut App) {
    app.configure_sets(
        OnEnter(GameState::InLevel),
        (GameSet::Setup, GameSet::Spawning).chain(),
    )
    .configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Movement,
            GameSet::Pickups,
            GameSet::Sequence,
            GameSet::Presentation,
        )
            .chain(),
    )
    .configure_sets(
        OnExit(GameState::InLevel),
        (GameSet::Teardown, GameSet::Cleanup).chain(),
    );
}
