pub use bevy::prelude::*;
pub use crate::states::*;

pub use crate::config::UnlockTuning;
pub use crate::game::sets::GameSet;

// Re-export components
pub use crate::collectible::components::*;
pub use crate::level::components::*;
pub use crate::player::components::*;
pub use crate::proxy::components::*;
pub use crate::unlock::components::*;

// Re-export resources
pub use crate::level::placement::LevelCatalog;
pub use crate::level::resources::*;
pub use crate::player::resources::*;
pub use crate::store::{MemoryStore, RonFileStore, SaveData, SaveStore, StoreError};

// Re-export messages
pub use crate::collectible::events::*;
pub use crate::unlock::events::*;
