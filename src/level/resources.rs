use bevy::prelude::*;

/// The map currently loaded (or about to be loaded)
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CurrentLevel {
    pub map_id: String,
}

impl CurrentLevel {
    pub fn new(map_id: impl Into<String>) -> Self {
        Self { map_id: map_id.into() }
    }
}

/// World-space bounds of the loaded level; scripted camera moves stay inside
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds(pub Rect);

impl LevelBounds {
    /// Clamps a camera target so a view of `half_extent` stays within the bounds.
    /// On an axis where the level is smaller than the view, the target is centered.
    pub fn clamp_camera_target(&self, target: Vec2, half_extent: Vec2) -> Vec2 {
        let min = self.0.min + half_extent;
        let max = self.0.max - half_extent;
        let center = self.0.center();

        let x = if min.x <= max.x { target.x.clamp(min.x, max.x) } else { center.x };
        let y = if min.y <= max.y { target.y.clamp(min.y, max.y) } else { center.y };
        Vec2::new(x, y)
    }
}
