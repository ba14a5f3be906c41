pub mod components;
pub mod plugin;
pub mod state;
pub mod systems;

pub use components::*;
pub use plugin::*;
pub use state::*;
pub use systems::*;
