pub mod plugin;
pub mod sets;

pub use plugin::*;
pub use sets::*;
