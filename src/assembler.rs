//! Geometry assembly.
//!
//! Builds concrete per-voxel elements from a flattened model and its
//! resolved texture map. Container-style blocks (chests, signs) declare no
//! elements at all; those fall back to a plain full cube, an approximation
//! the output format documents rather than hides.

use crate::asset_store::{AssetStore, ModelDefinition};
use crate::error::{CompactorError, Result};
use crate::geometry::{ElementFaces, ResolvedElement, ResolvedFace};
use crate::resolver::resolve_textures;
use crate::types::{Direction, InputBlock, TileEntity};
use std::collections::{BTreeMap, HashMap};

/// UV rectangle used by the fallback cube's faces.
const FALLBACK_UV: [i32; 4] = [16, 0, 0, 16];

/// Assemble a flattened model's elements, substituting concrete texture
/// locators into every face.
///
/// Fails `TextureKeyNotFound` when a face references a slot absent from the
/// resolved texture map.
pub fn assemble_elements(
    model: &ModelDefinition,
    textures: &HashMap<String, String>,
) -> Result<Vec<ResolvedElement>> {
    let mut elements = Vec::with_capacity(model.elements.len());

    for element in &model.elements {
        let mut faces = BTreeMap::new();

        for (direction, face) in &element.faces {
            // Face references are written "#slot"; a bare slot name resolves the same way.
            let key = face.texture.trim_start_matches('#');
            let locator = textures
                .get(key)
                .ok_or_else(|| CompactorError::TextureKeyNotFound(key.to_string()))?;

            faces.insert(
                *direction,
                ResolvedFace {
                    uv: face.uv,
                    texture: locator.clone(),
                    cullface: face.cullface,
                },
            );
        }

        elements.push(ResolvedElement {
            from: element.from,
            to: element.to,
            rotation: element.rotation.clone(),
            faces: ElementFaces::Directional(faces),
        });
    }

    Ok(elements)
}

/// Build the substitute cube for a block whose resolved models declare no
/// elements.
///
/// Requires a tile entity with the block's id in the region, else
/// `TileEntityNotFound`: only container blocks legitimately arrive here, and
/// their contents cannot be reconstructed generically. The cube spans the
/// full 0..16 bounds with six outward faces, each culled against its own
/// direction and textured from a single `all` slot bound to
/// `fallback_texture` (validated against the store).
pub fn fallback_cube(
    block: &InputBlock,
    tile_entities: &HashMap<String, TileEntity>,
    store: &AssetStore,
    fallback_texture: &str,
) -> Result<Vec<ResolvedElement>> {
    if !tile_entities.contains_key(&block.name) {
        return Err(CompactorError::TileEntityNotFound(block.name.clone()));
    }

    let textures: HashMap<String, String> =
        [("all".to_string(), fallback_texture.to_string())].into_iter().collect();
    let mut resolved = resolve_textures(store, &textures)?;
    let locator = resolved
        .remove("all")
        .ok_or_else(|| CompactorError::TextureKeyNotFound("all".to_string()))?;

    let faces: BTreeMap<Direction, ResolvedFace> = Direction::ALL
        .iter()
        .map(|d| {
            (
                *d,
                ResolvedFace {
                    uv: Some(FALLBACK_UV),
                    texture: locator.clone(),
                    cullface: Some(*d),
                },
            )
        })
        .collect();

    Ok(vec![ResolvedElement {
        from: [0.0, 0.0, 0.0],
        to: [16.0, 16.0, 16.0],
        rotation: None,
        faces: ElementFaces::Directional(faces),
    }])
}
