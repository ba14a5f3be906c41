use bevy::prelude::*;

#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, States)]
pub enum GameState {
    /// Between maps; `CurrentLevel` names the map about to load
    #[default]
    Loading,
    InLevel,
}
