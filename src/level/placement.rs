use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::UnlockTuning;
use crate::prerequisite::RequirementSpec;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("level catalog IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("level catalog could not be parsed: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("level catalog has no levels")]
    Empty,
}

/// Every level the game knows about, with its design-time placements
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelPlacement>,
    #[serde(default)]
    pub tuning: Option<UnlockTuning>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelPlacement {
    pub map_id: String,
    /// `[min_x, min_y, max_x, max_y]`
    #[serde(default = "default_bounds")]
    pub bounds: [f32; 4],
    #[serde(default)]
    pub spawn: [f32; 2],
    #[serde(default)]
    pub bonuses: Vec<BonusPlacement>,
    #[serde(default)]
    pub prerequisites: Vec<PrerequisitePlacement>,
}

/// A bonus collectible gated on prerequisites from other maps.
///
/// The member map list and required count are parsed into a
/// [`RequirementSpec`] when the placement is built or deserialized.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "BonusPlacementData")]
pub struct BonusPlacement {
    requirement: RequirementSpec,
    pub position: [f32; 2],
    /// Activation point for the reveal; defaults to the item position
    pub trigger: Option<[f32; 2]>,
}

/// Bonus placement as written in a catalog
#[derive(Deserialize)]
struct BonusPlacementData {
    group_id: String,
    /// Delimited list of prerequisite map ids, e.g. `"A,B,C"`
    #[serde(default)]
    member_maps: String,
    #[serde(default)]
    required_count: Option<String>,
    position: [f32; 2],
    #[serde(default)]
    trigger: Option<[f32; 2]>,
}

impl From<BonusPlacementData> for BonusPlacement {
    fn from(data: BonusPlacementData) -> Self {
        Self::new(
            &data.group_id,
            &data.member_maps,
            data.required_count.as_deref(),
            data.position,
            data.trigger,
        )
    }
}

/// The collectible a map contributes to a group
#[derive(Debug, Clone, Deserialize)]
pub struct PrerequisitePlacement {
    pub group_id: String,
    pub position: [f32; 2],
}

fn default_bounds() -> [f32; 4] {
    [-480.0, -270.0, 480.0, 270.0]
}

impl LevelCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(contents: &str) -> Result<Self, CatalogError> {
        let catalog: LevelCatalog = ron::from_str(contents)?;
        if catalog.levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Built-in catalog: three prerequisite maps and a hub holding the bonus
    pub fn demo() -> Self {
        let prerequisite_map = |map_id: &str, position: [f32; 2]| LevelPlacement {
            map_id: map_id.to_string(),
            bounds: default_bounds(),
            spawn: [0.0, 0.0],
            bonuses: Vec::new(),
            prerequisites: vec![PrerequisitePlacement {
                group_id: "G1".to_string(),
                position,
            }],
        };

        Self {
            levels: vec![
                LevelPlacement {
                    map_id: "hub".to_string(),
                    bounds: [-960.0, -540.0, 960.0, 540.0],
                    spawn: [0.0, 0.0],
                    bonuses: vec![BonusPlacement::new(
                        "G1",
                        "A,B,C",
                        None,
                        [600.0, 200.0],
                        Some([450.0, 120.0]),
                    )],
                    prerequisites: Vec::new(),
                },
                prerequisite_map("A", [200.0, 80.0]),
                prerequisite_map("B", [-220.0, 140.0]),
                prerequisite_map("C", [120.0, -180.0]),
            ],
            tuning: None,
        }
    }

    pub fn level(&self, map_id: &str) -> Option<&LevelPlacement> {
        self.levels.iter().find(|level| level.map_id == map_id)
    }

    pub fn first_map(&self) -> Option<&str> {
        self.levels.first().map(|level| level.map_id.as_str())
    }

    /// The map after `map_id`, wrapping around; the first map if `map_id` is unknown
    pub fn next_map(&self, map_id: &str) -> Option<&str> {
        let index = self.levels.iter().position(|level| level.map_id == map_id);
        let next = match index {
            Some(index) => (index + 1) % self.levels.len(),
            None => 0,
        };
        self.levels.get(next).map(|level| level.map_id.as_str())
    }
}

impl LevelPlacement {
    pub fn bounds_rect(&self) -> Rect {
        let [min_x, min_y, max_x, max_y] = self.bounds;
        Rect::new(min_x, min_y, max_x, max_y)
    }

    pub fn spawn_position(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }
}

impl BonusPlacement {
    pub fn new(
        group_id: &str,
        member_maps: &str,
        required_count: Option<&str>,
        position: [f32; 2],
        trigger: Option<[f32; 2]>,
    ) -> Self {
        Self {
            requirement: RequirementSpec::parse(group_id, member_maps, required_count),
            position,
            trigger,
        }
    }

    pub fn requirement(&self) -> &RequirementSpec {
        &self.requirement
    }

    pub fn group_id(&self) -> &str {
        self.requirement.group_id()
    }

    pub fn item_position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    pub fn trigger_position(&self) -> Vec2 {
        self.trigger.map(Vec2::from).unwrap_or_else(|| self.item_position())
    }
}
