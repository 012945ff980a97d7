//! Concrete per-voxel geometry.
//!
//! These are the fully resolved forms: every texture reference is a concrete
//! locator (or, after interning, a region symbol) and no symbolic `#name`
//! remains. All of them hash structurally so the compactor can group blocks
//! by appearance; f32 fields hash via their bit patterns (bounds and angles
//! come from JSON literals and are never NaN).

use crate::types::{BlockPosition, BlockTransform, Direction, ElementRotation};
use std::collections::BTreeMap;

/// A face with its texture fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedFace {
    /// UV rectangle, if the model declared one.
    pub uv: Option<[i32; 4]>,
    /// Concrete texture locator, or the interned region symbol after
    /// compaction.
    pub texture: String,
    /// Cull hint carried through from the model.
    pub cullface: Option<Direction>,
}

impl ResolvedFace {
    /// The face's appearance: what it looks like, ignoring the cull hint.
    pub fn appearance(&self) -> (&str, Option<[i32; 4]>) {
        (&self.texture, self.uv)
    }
}

/// The face map of a resolved element.
///
/// `Uniform` is the synthetic "any" direction produced by simplification:
/// the element looks identical on all six sides. It is an encoding of six
/// equal faces, not a removal of geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementFaces {
    /// One shared appearance on all six sides (cull hint cleared).
    Uniform(ResolvedFace),
    /// Per-direction faces; sides absent from the map are not drawn.
    Directional(BTreeMap<Direction, ResolvedFace>),
}

impl ElementFaces {
    /// Mutable iteration over every face, in a fixed deterministic order.
    pub fn iter_mut(&mut self) -> Box<dyn Iterator<Item = &mut ResolvedFace> + '_> {
        match self {
            ElementFaces::Uniform(face) => Box::new(std::iter::once(face)),
            ElementFaces::Directional(faces) => Box::new(faces.values_mut()),
        }
    }

    /// Expand to the explicit six-sided map. Inverse of face collapsing;
    /// reproduces the appearance the uniform encoding stands for.
    pub fn expand(&self) -> BTreeMap<Direction, ResolvedFace> {
        match self {
            ElementFaces::Uniform(face) => Direction::ALL
                .iter()
                .map(|d| (*d, face.clone()))
                .collect(),
            ElementFaces::Directional(faces) => faces.clone(),
        }
    }
}

/// A concrete cuboid element of a resolved block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    pub rotation: Option<ElementRotation>,
    /// Face map.
    pub faces: ElementFaces,
}

impl ResolvedElement {
    /// Check if this element spans the default full cube bounds.
    pub fn is_full_cube(&self) -> bool {
        self.from == [0.0, 0.0, 0.0] && self.to == [16.0, 16.0, 16.0]
    }
}

impl Eq for ResolvedElement {}

impl std::hash::Hash for ResolvedElement {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for v in self.from.iter().chain(self.to.iter()) {
            state.write_u32(v.to_bits());
        }
        self.rotation.hash(state);
        self.faces.hash(state);
    }
}

/// Cuboid bounds in the 0..16 local cube space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub from: [f32; 3],
    pub to: [f32; 3],
}

impl Eq for Bounds {}

impl std::hash::Hash for Bounds {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for v in self.from.iter().chain(self.to.iter()) {
            state.write_u32(v.to_bits());
        }
    }
}

/// The canonical shape of a block, as one of two equivalent encodings.
///
/// `Uniform` is the minimal form for single-cuboid blocks whose visible
/// faces all share one appearance; `Elements` keeps the full list. Both
/// reconstruct the same rendered geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// Minimal encoding: one cuboid, one appearance.
    Uniform {
        /// Bounds, `None` when the default 0..16 cube.
        bounds: Option<Bounds>,
        /// Texture locator or interned symbol.
        texture: String,
        /// Shared UV rectangle, if declared.
        uv: Option<[i32; 4]>,
        /// The single declared face direction; `None` means all six sides.
        face: Option<Direction>,
    },
    /// Full encoding: the element list as assembled.
    Elements(Vec<ResolvedElement>),
}

/// A block resolved to concrete geometry, before grouping.
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    /// Voxel position in the region.
    pub position: BlockPosition,
    /// Canonical shape (position-independent).
    pub shape: BlockShape,
    /// Directions this block connects towards.
    pub connected_sides: Vec<Direction>,
    /// Block-level transform, `None` when identity.
    pub transform: Option<BlockTransform>,
}
