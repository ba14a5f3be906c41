pub mod components;
pub mod placement;
pub mod plugin;
pub mod resources;
pub mod systems;

pub use components::*;
pub use placement::*;
pub use plugin::*;
pub use resources::*;
pub use systems::*;
