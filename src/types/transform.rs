//! Transform types for block and element rotations.

use super::Axis;
use serde::{Deserialize, Serialize};

/// Block-level transform from a blockstate variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BlockTransform {
    /// X rotation in degrees (0, 90, 180, 270).
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    pub y: i32,
    /// If true, UV coordinates don't rotate with the block.
    pub uvlock: bool,
}

impl BlockTransform {
    pub fn new(x: i32, y: i32, uvlock: bool) -> Self {
        Self { x, y, uvlock }
    }

    /// Check if this is an identity transform (no rotation, no uvlock).
    pub fn is_identity(&self) -> bool {
        self.x == 0 && self.y == 0 && !self.uvlock
    }
}

/// Element-level rotation from a model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 local cube coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

// Angles and origins come from fixed JSON literals, never NaN.
impl Eq for ElementRotation {}

impl std::hash::Hash for ElementRotation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for v in self.origin {
            state.write_u32(v.to_bits());
        }
        self.axis.hash(state);
        state.write_u32(self.angle.to_bits());
    }
}
