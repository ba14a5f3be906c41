pub mod collectible;
pub mod config;
pub mod game;
pub mod level;
pub mod player;
pub mod prelude;
pub mod prerequisite;
pub mod proxy;
pub mod scene;
pub mod states;
pub mod store;
pub mod unlock;

pub use game::plugin as game_plugin;
