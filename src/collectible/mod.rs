//! Per-level controllers deciding how each bonus collectible appears, and the pickups themselves.

pub mod components;
pub mod decision;
pub mod events;
pub mod plugin;
pub mod systems;

pub use components::*;
pub use decision::*;
pub use events::*;
pub use plugin::*;
pub use systems::*;
