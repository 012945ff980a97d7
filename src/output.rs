//! Output wire format.
//!
//! One JSON document per request: author/name metadata plus, per region, a
//! texture symbol table and the grouped block records. Fields equal to their
//! default (full-cube bounds, absent uv/face/transform, no connected sides)
//! are omitted to keep payloads small; absence on read implies the default.

use crate::geometry::{BlockShape, ElementFaces, ResolvedElement};
use crate::types::{BlockPosition, BlockTransform, Direction, ElementRotation};
use serde::Serialize;
use std::collections::BTreeMap;

/// The complete renderer-ready document.
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument {
    pub author: String,
    pub name: String,
    pub regions: BTreeMap<String, OutputRegion>,
}

/// One compacted region: interned textures plus grouped block records.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRegion {
    /// Texture symbol -> URL locator.
    pub textures: BTreeMap<String, String>,
    /// Grouped block records.
    pub blocks: Vec<OutputBlock>,
}

/// A grouped block record: one canonical shape and every voxel position
/// sharing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputBlock {
    /// Minimal encoding for uniform-appearance cuboids.
    Uniform(UniformBlock),
    /// Full element-list encoding.
    Full(FullBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<[f32; 3]>,
    /// Texture symbol into the region's table.
    pub texture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv: Option<[i32; 4]>,
    /// Single declared face direction; absent means all six sides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<Direction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connected_sides: Vec<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformations: Option<BlockTransform>,
    pub positions: Vec<[i32; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullBlock {
    pub elements: Vec<OutputElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connected_sides: Vec<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformations: Option<BlockTransform>,
    pub positions: Vec<[i32; 3]>,
}

/// A cuboid element in the full encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputElement {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    /// Keyed by direction name, or "any" for the collapsed uniform entry.
    pub faces: BTreeMap<String, OutputFace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv: Option<[i32; 4]>,
    /// Texture symbol into the region's table.
    pub texture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cullface: Option<Direction>,
}

impl OutputBlock {
    /// Build the record for one canonical shape group.
    pub fn from_group(
        shape: BlockShape,
        connected_sides: Vec<Direction>,
        transform: Option<BlockTransform>,
        positions: Vec<BlockPosition>,
    ) -> Self {
        let positions = positions.iter().map(BlockPosition::to_array).collect();

        match shape {
            BlockShape::Uniform {
                bounds,
                texture,
                uv,
                face,
            } => OutputBlock::Uniform(UniformBlock {
                from: bounds.map(|b| b.from),
                to: bounds.map(|b| b.to),
                texture,
                uv,
                face,
                connected_sides,
                transformations: transform,
                positions,
            }),
            BlockShape::Elements(elements) => OutputBlock::Full(FullBlock {
                elements: elements.into_iter().map(output_element).collect(),
                connected_sides,
                transformations: transform,
                positions,
            }),
        }
    }
}

fn output_element(element: ResolvedElement) -> OutputElement {
    let faces = match element.faces {
        ElementFaces::Uniform(face) => [(
            "any".to_string(),
            OutputFace {
                uv: face.uv,
                texture: face.texture,
                cullface: None,
            },
        )]
        .into_iter()
        .collect(),
        ElementFaces::Directional(faces) => faces
            .into_iter()
            .map(|(direction, face)| {
                (
                    direction.to_string(),
                    OutputFace {
                        uv: face.uv,
                        texture: face.texture,
                        cullface: face.cullface,
                    },
                )
            })
            .collect(),
    };

    OutputElement {
        from: element.from,
        to: element.to,
        rotation: element.rotation,
        faces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, ResolvedFace};

    #[test]
    fn test_uniform_block_omits_defaults() {
        let block = OutputBlock::from_group(
            BlockShape::Uniform {
                bounds: None,
                texture: "t0".to_string(),
                uv: None,
                face: None,
            },
            vec![],
            None,
            vec![BlockPosition::new(0, 0, 0), BlockPosition::new(1, 0, 0)],
        );

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "texture": "t0",
                "positions": [[0, 0, 0], [1, 0, 0]]
            })
        );
    }

    #[test]
    fn test_uniform_block_carries_non_defaults() {
        let block = OutputBlock::from_group(
            BlockShape::Uniform {
                bounds: Some(Bounds {
                    from: [0.0, 0.0, 0.0],
                    to: [16.0, 8.0, 16.0],
                }),
                texture: "t1".to_string(),
                uv: Some([0, 0, 16, 16]),
                face: Some(Direction::Up),
            },
            vec![Direction::North],
            Some(BlockTransform::new(0, 90, false)),
            vec![BlockPosition::new(2, 3, 4)],
        );

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": [0.0, 0.0, 0.0],
                "to": [16.0, 8.0, 16.0],
                "texture": "t1",
                "uv": [0, 0, 16, 16],
                "face": "up",
                "connectedSides": ["north"],
                "transformations": { "x": 0, "y": 90, "uvlock": false },
                "positions": [[2, 3, 4]]
            })
        );
    }

    #[test]
    fn test_full_block_faces_keys() {
        let element = ResolvedElement {
            from: [0.0, 0.0, 0.0],
            to: [16.0, 16.0, 16.0],
            rotation: None,
            faces: ElementFaces::Uniform(ResolvedFace {
                uv: None,
                texture: "t0".to_string(),
                cullface: None,
            }),
        };
        let block = OutputBlock::from_group(
            BlockShape::Elements(vec![element]),
            vec![],
            None,
            vec![BlockPosition::new(0, 0, 0)],
        );

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json["elements"][0]["faces"],
            serde_json::json!({ "any": { "texture": "t0" } })
        );
    }
}
