//! Block model document parsing.
//!
//! Block models define the 3D geometry of blocks using cuboid elements and a
//! map of symbolic texture slots.

use crate::types::{Direction, ElementRotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed block model from models/*.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Texture variable definitions (slot name -> reference).
    ///
    /// A reference is either a concrete texture id ("block/stone") or a
    /// `#name` indirection into this same map.
    #[serde(default)]
    pub textures: HashMap<String, String>,

    /// Model elements (cuboids). Empty when inherited or absent.
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

impl ModelDefinition {
    /// Get the full parent resource location.
    pub fn parent_location(&self) -> Option<String> {
        self.parent.as_ref().map(|p| {
            if p.contains(':') {
                p.clone()
            } else {
                format!("minecraft:{}", p)
            }
        })
    }

    /// Check if this model declares its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }
}

/// A cuboid element within a model.
///
/// Corners live in the fixed local cube space, each axis in [0, 16].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

impl ModelElement {
    /// Default bounds of a full unit cube.
    pub const FULL_CUBE: ([f32; 3], [f32; 3]) = ([0.0, 0.0, 0.0], [16.0, 16.0, 16.0]);

    /// Check if this element spans the default full cube bounds.
    pub fn is_full_cube(&self) -> bool {
        (self.from, self.to) == Self::FULL_CUBE
    }
}

/// A face of a model element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV rectangle [u1, v1, u2, v2] in the 0-16 range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<[i32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Cull hint: the face is hidden when this side touches a solid
    /// neighbor. Carried through, not enforced by this engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cullface: Option<Direction>,
}
