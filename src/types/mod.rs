//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::{BlockTransform, ElementRotation};

use std::collections::HashMap;

/// A block position in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position as the wire-format triple.
    pub fn to_array(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Input block from a region source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBlock {
    /// Block name, e.g., "minecraft:stone"
    pub name: String,
    /// Block properties, e.g., {"facing": "north"}
    pub properties: HashMap<String, String>,
}

impl InputBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if this is an air block.
    pub fn is_air(&self) -> bool {
        matches!(
            self.name.as_str(),
            "minecraft:air" | "minecraft:cave_air" | "minecraft:void_air" | "air"
        )
    }

    /// Directions this block connects towards, derived from boolean-like
    /// properties such as `north=true` on fences and walls.
    ///
    /// Returned sorted ([`Direction`]'s order) so downstream hashing and
    /// output are deterministic.
    pub fn connected_sides(&self) -> Vec<Direction> {
        let mut sides: Vec<Direction> = self
            .properties
            .iter()
            .filter(|(_, value)| value.as_str() == "true")
            .filter_map(|(key, _)| Direction::parse(key))
            .collect();
        sides.sort();
        sides
    }
}

/// Auxiliary per-voxel metadata for blocks with container contents.
///
/// The payload is opaque to the engine; only the block id is consulted, for
/// the elementless-block fallback.
#[derive(Debug, Clone)]
pub struct TileEntity {
    /// Block id this entry belongs to, e.g. "minecraft:chest".
    pub id: String,
    /// Raw metadata carried through from the region container format.
    pub data: serde_json::Value,
}

impl TileEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: serde_json::Value::Null,
        }
    }
}
