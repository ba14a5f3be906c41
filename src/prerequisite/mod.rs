//! Prerequisite counting across levels.

pub mod counter;
pub mod spec;

pub use counter::*;
pub use spec::*;
