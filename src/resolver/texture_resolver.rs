//! Symbolic texture resolution.
//!
//! Turns a flattened model's texture map into concrete URL locators.
//! Concrete entries are verified against the asset store; `#name`
//! indirections are substituted from the same pass's concrete results.
//! Substitution is single-level: a chain like `#a -> #b -> id` is an
//! authoring error and fails rather than being followed.

use crate::asset_store::AssetStore;
use crate::error::{CompactorError, Result};
use std::collections::HashMap;

/// Resolve every entry of a texture map to a concrete locator.
pub fn resolve_textures(
    store: &AssetStore,
    textures: &HashMap<String, String>,
) -> Result<HashMap<String, String>> {
    let mut concrete = HashMap::with_capacity(textures.len());

    // First pass: concrete texture ids become URL locators.
    for (key, value) in textures {
        if value.starts_with('#') {
            continue;
        }
        let locator = store
            .texture_locator(value)
            .ok_or_else(|| CompactorError::TextureNotFound(value.clone()))?;
        concrete.insert(key.clone(), locator);
    }

    // Second pass: one level of `#name` substitution against the pass-one
    // snapshot only. Writing into a separate map keeps an indirection from
    // ever seeing another indirection's result, whatever the iteration
    // order, so depth-two chains always fail.
    let mut resolved = concrete.clone();
    for (key, value) in textures {
        let Some(name) = value.strip_prefix('#') else {
            continue;
        };
        let locator = concrete
            .get(name)
            .ok_or_else(|| CompactorError::UnresolvedTextureReference(value.clone()))?;
        resolved.insert(key.clone(), locator.clone());
    }

    Ok(resolved)
}
