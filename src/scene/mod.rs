//! Host scene services: audio buses, scripted camera, particles and the freeze overlay.

pub mod audio;
pub mod camera;
pub mod host;
pub mod overlay;
pub mod particles;
pub mod plugin;

pub use host::SceneHost;
pub use plugin::*;
