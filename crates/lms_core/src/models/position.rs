//! Position and region records.
//!
//! `EntityPos` is a full location with orientation (spawn points, player
//! locations); `BlockPos` drops the orientation and is used for region
//! corners. Both carry the name of the world they belong to.
//!
//! Fuzzy equality: two positions in the same world describe the same place
//! when every numeric component differs by less than [`TOLERANCE`]. The
//! geometry store uses this to collapse near-identical inputs onto one
//! persisted row.

use serde::{Deserialize, Serialize};

/// Fuzzy-equality threshold for coordinate matching.
pub const TOLERANCE: f64 = 1e-4;

fn within_tolerance(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// A location with orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPos {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl EntityPos {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self { world: world.into(), x, y, z, yaw, pitch }
    }

    /// Whether `other` describes the same place, within [`TOLERANCE`] on
    /// every component and in the same world.
    pub fn matches(&self, other: &EntityPos) -> bool {
        self.world == other.world
            && within_tolerance(self.x, other.x)
            && within_tolerance(self.y, other.y)
            && within_tolerance(self.z, other.z)
            && within_tolerance(self.yaw as f64, other.yaw as f64)
            && within_tolerance(self.pitch as f64, other.pitch as f64)
    }
}

/// A location without orientation, used for region corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPos {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlockPos {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self { world: world.into(), x, y, z }
    }

    pub fn matches(&self, other: &BlockPos) -> bool {
        self.world == other.world
            && within_tolerance(self.x, other.x)
            && within_tolerance(self.y, other.y)
            && within_tolerance(self.z, other.z)
    }
}

/// An axis-aligned bounding region between two corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Region {
    pub fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }
}
