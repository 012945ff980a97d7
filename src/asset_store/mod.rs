//! Asset store: read-only lookup of blockstates, models and textures.
//!
//! The store holds the already-extracted client assets (blockstate and model
//! JSON documents, texture files) indexed by namespace. Content is immutable
//! once loaded, so resolvers may cache lookups freely for a run.

pub mod blockstate;
pub mod loader;
pub mod model;
pub mod texture;

pub use blockstate::{ApplyValue, BlockstateDefinition, ModelVariant, MultipartCase, MultipartCondition};
pub use model::{ModelDefinition, ModelElement, ModelFace};
pub use texture::TextureCatalog;

use std::collections::HashMap;

/// Default base URL textures are served from.
pub const DEFAULT_TEXTURE_BASE_URL: &str = "/textures";

/// A loaded set of client assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    /// Blockstate definitions by namespace and block ID.
    pub blockstates: HashMap<String, HashMap<String, BlockstateDefinition>>,

    /// Model definitions by namespace and model path.
    pub models: HashMap<String, HashMap<String, ModelDefinition>>,

    /// Texture catalogs by namespace.
    pub textures: HashMap<String, TextureCatalog>,

    /// Base URL for texture locators.
    pub texture_base_url: String,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self {
            blockstates: HashMap::new(),
            models: HashMap::new(),
            textures: HashMap::new(),
            texture_base_url: DEFAULT_TEXTURE_BASE_URL.to_string(),
        }
    }
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL used when building texture locators.
    pub fn with_texture_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.texture_base_url = base_url.into();
        self
    }

    /// Get a blockstate definition by full resource location (e.g., "minecraft:stone").
    pub fn get_blockstate(&self, resource_location: &str) -> Option<&BlockstateDefinition> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.blockstates.get(namespace).and_then(|ns| ns.get(path))
    }

    /// Get a model by full resource location (e.g., "minecraft:block/stone").
    pub fn get_model(&self, resource_location: &str) -> Option<&ModelDefinition> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.models.get(namespace).and_then(|ns| ns.get(path))
    }

    /// Get the URL locator for a texture, or `None` if the store has no file
    /// backing the given id.
    pub fn texture_locator(&self, resource_location: &str) -> Option<String> {
        let (namespace, path) = parse_resource_location(resource_location);
        let catalog = self.textures.get(namespace)?;
        if catalog.contains(path) {
            Some(texture::texture_url(&self.texture_base_url, namespace, path))
        } else {
            None
        }
    }

    /// Add a blockstate definition.
    pub fn add_blockstate(
        &mut self,
        namespace: &str,
        block_id: &str,
        definition: BlockstateDefinition,
    ) {
        self.blockstates
            .entry(namespace.to_string())
            .or_default()
            .insert(block_id.to_string(), definition);
    }

    /// Add a model.
    pub fn add_model(&mut self, namespace: &str, model_path: &str, model: ModelDefinition) {
        self.models
            .entry(namespace.to_string())
            .or_default()
            .insert(model_path.to_string(), model);
    }

    /// Register a texture path.
    pub fn add_texture(&mut self, namespace: &str, texture_path: &str) {
        self.textures
            .entry(namespace.to_string())
            .or_default()
            .insert(texture_path);
    }

    /// Get the total number of blockstate definitions.
    pub fn blockstate_count(&self) -> usize {
        self.blockstates.values().map(|m| m.len()).sum()
    }

    /// Get the total number of models.
    pub fn model_count(&self) -> usize {
        self.models.values().map(|m| m.len()).sum()
    }

    /// Get the total number of registered textures.
    pub fn texture_count(&self) -> usize {
        self.textures.values().map(|c| c.len()).sum()
    }
}

/// Parse a resource location into namespace and path.
/// "minecraft:block/stone" -> ("minecraft", "block/stone")
/// "block/stone" -> ("minecraft", "block/stone")
pub(crate) fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        ("minecraft", resource_location)
    }
}
