//! Block state and model resolution.
//!
//! This module resolves block states to concrete model variants, flattens
//! model inheritance chains, and resolves symbolic texture references.

pub mod model_resolver;
pub mod state_resolver;
pub mod texture_resolver;

pub use model_resolver::ModelResolver;
pub use state_resolver::StateResolver;
pub use texture_resolver::resolve_textures;

use crate::asset_store::ModelDefinition;
use crate::types::BlockTransform;
use std::collections::HashMap;

/// A fully flattened model with its resolved texture locators and the
/// block-level transform its variant carried.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    /// Flattened model (parent chain merged in).
    pub model: ModelDefinition,
    /// Slot name -> concrete URL locator.
    pub textures: HashMap<String, String>,
    /// Block-level transform (x/y rotation, uvlock).
    pub transform: BlockTransform,
}
