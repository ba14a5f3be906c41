//! The one-time reveal of a bonus item once its prerequisites are met.

pub mod components;
pub mod events;
pub mod phase;
pub mod plugin;
pub mod sequence;
pub mod services;
pub mod systems;

pub use components::*;
pub use events::*;
pub use phase::*;
pub use plugin::*;
pub use sequence::*;
pub use services::*;
pub use systems::*;
