//! Model inheritance resolution.
//!
//! Flattens a model's parent chain into a single texture map and element
//! list. Parents are resolved first (depth-first), then merged: texture maps
//! merge key-wise with the child overriding, elements are replaced wholesale
//! by the most-specific level that declares them.

use crate::asset_store::{AssetStore, ModelDefinition};
use crate::error::{CompactorError, Result};
use std::collections::{HashMap, HashSet};

/// Resolves model inheritance chains.
///
/// Results are memoized for the lifetime of the resolver; store content is
/// immutable for a run, so cached entries never go stale.
pub struct ModelResolver<'a> {
    store: &'a AssetStore,
    cache: std::cell::RefCell<HashMap<String, ModelDefinition>>,
}

impl<'a> ModelResolver<'a> {
    pub fn new(store: &'a AssetStore) -> Self {
        Self {
            store,
            cache: std::cell::RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a model with all inherited properties flattened in.
    pub fn resolve(&self, model_location: &str) -> Result<ModelDefinition> {
        let normalized = normalize_location(model_location);

        if let Some(cached) = self.cache.borrow().get(&normalized) {
            return Ok(cached.clone());
        }

        let mut visited = HashSet::new();
        let resolved = self.resolve_internal(&normalized, &mut visited)?;

        self.cache
            .borrow_mut()
            .insert(normalized, resolved.clone());

        Ok(resolved)
    }

    fn resolve_internal(
        &self,
        model_location: &str,
        visited: &mut HashSet<String>,
    ) -> Result<ModelDefinition> {
        let normalized = normalize_location(model_location);

        // Revisiting an id means the parent chain loops.
        if !visited.insert(normalized.clone()) {
            return Err(CompactorError::CyclicParentReference(normalized));
        }

        let base_model = self
            .store
            .get_model(&normalized)
            .ok_or_else(|| CompactorError::ModelNotFound(normalized.clone()))?;

        let parent_location = match base_model.parent_location() {
            Some(parent) => parent,
            None => return Ok(base_model.clone()),
        };

        // Builtin parents (builtin/entity, builtin/generated) end the chain;
        // their geometry is supplied by the renderer, not by a document.
        if parent_location
            .trim_start_matches("minecraft:")
            .starts_with("builtin/")
        {
            return Ok(base_model.clone());
        }

        let parent_model = self.resolve_internal(&parent_location, visited)?;

        Ok(merge_models(&parent_model, base_model))
    }
}

/// Merge a parent model into a child model.
/// Child texture entries override parent entries; elements are taken from the
/// child when declared, otherwise inherited unchanged.
fn merge_models(parent: &ModelDefinition, child: &ModelDefinition) -> ModelDefinition {
    let mut merged = parent.clone();

    for (key, value) in &child.textures {
        merged.textures.insert(key.clone(), value.clone());
    }

    if child.has_elements() {
        merged.elements = child.elements.clone();
    }

    // Chain is flattened now.
    merged.parent = None;

    merged
}

/// Normalize a model location to a full resource path.
fn normalize_location(location: &str) -> String {
    if location.contains(':') {
        location.to_string()
    } else {
        format!("minecraft:{}", location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_store::model::{ModelElement, ModelFace};
    use crate::types::Direction;

    fn create_test_store() -> AssetStore {
        let mut store = AssetStore::new();

        // cube (root): declares elements but no textures
        let cube = ModelDefinition {
            parent: None,
            textures: HashMap::new(),
            elements: vec![ModelElement {
                from: [0.0, 0.0, 0.0],
                to: [16.0, 16.0, 16.0],
                rotation: None,
                faces: Direction::ALL
                    .iter()
                    .map(|d| {
                        (
                            *d,
                            ModelFace {
                                texture: "#all".to_string(),
                                uv: None,
                                cullface: Some(*d),
                            },
                        )
                    })
                    .collect(),
            }],
        };
        store.add_model("minecraft", "block/cube", cube);

        // cube_all: inherits elements, adds a particle indirection
        let cube_all = ModelDefinition {
            parent: Some("block/cube".to_string()),
            textures: [("particle".to_string(), "#all".to_string())]
                .into_iter()
                .collect(),
            elements: vec![],
        };
        store.add_model("minecraft", "block/cube_all", cube_all);

        // stone: binds the "all" slot
        let stone = ModelDefinition {
            parent: Some("block/cube_all".to_string()),
            textures: [("all".to_string(), "block/stone".to_string())]
                .into_iter()
                .collect(),
            elements: vec![],
        };
        store.add_model("minecraft", "block/stone", stone);

        store
    }

    #[test]
    fn test_resolve_root_model() {
        let store = create_test_store();
        let resolver = ModelResolver::new(&store);

        let model = resolver.resolve("minecraft:block/cube").unwrap();
        assert!(model.parent.is_none());
        assert!(model.has_elements());
    }

    #[test]
    fn test_resolve_with_inheritance() {
        let store = create_test_store();
        let resolver = ModelResolver::new(&store);

        let model = resolver.resolve("minecraft:block/stone").unwrap();

        // Elements inherited from the nearest declaring ancestor (cube).
        assert_eq!(model.elements.len(), 1);
        assert_eq!(model.elements[0].faces.len(), 6);

        // Texture maps merged across all three levels.
        assert_eq!(model.textures.get("all"), Some(&"block/stone".to_string()));
        assert_eq!(model.textures.get("particle"), Some(&"#all".to_string()));
        assert!(model.parent.is_none());
    }

    #[test]
    fn test_child_texture_overrides_parent() {
        let mut store = create_test_store();
        let granite = ModelDefinition {
            parent: Some("block/stone".to_string()),
            textures: [("all".to_string(), "block/granite".to_string())]
                .into_iter()
                .collect(),
            elements: vec![],
        };
        store.add_model("minecraft", "block/granite", granite);

        let resolver = ModelResolver::new(&store);
        let model = resolver.resolve("block/granite").unwrap();
        assert_eq!(
            model.textures.get("all"),
            Some(&"block/granite".to_string())
        );
    }

    #[test]
    fn test_child_elements_replace_wholesale() {
        let mut store = create_test_store();
        let carpet = ModelDefinition {
            parent: Some("block/cube_all".to_string()),
            textures: HashMap::new(),
            elements: vec![ModelElement {
                from: [0.0, 0.0, 0.0],
                to: [16.0, 1.0, 16.0],
                rotation: None,
                faces: HashMap::new(),
            }],
        };
        store.add_model("minecraft", "block/carpet", carpet);

        let resolver = ModelResolver::new(&store);
        let model = resolver.resolve("block/carpet").unwrap();
        // The child's single thin element wins over cube's full cube.
        assert_eq!(model.elements.len(), 1);
        assert_eq!(model.elements[0].to, [16.0, 1.0, 16.0]);
    }

    #[test]
    fn test_missing_model() {
        let store = create_test_store();
        let resolver = ModelResolver::new(&store);

        let result = resolver.resolve("minecraft:block/nonexistent");
        assert!(matches!(result, Err(CompactorError::ModelNotFound(_))));
    }

    #[test]
    fn test_cyclic_parent_chain() {
        let mut store = AssetStore::new();
        store.add_model(
            "minecraft",
            "block/a",
            ModelDefinition {
                parent: Some("block/b".to_string()),
                ..Default::default()
            },
        );
        store.add_model(
            "minecraft",
            "block/b",
            ModelDefinition {
                parent: Some("block/a".to_string()),
                ..Default::default()
            },
        );

        let resolver = ModelResolver::new(&store);
        let result = resolver.resolve("block/a");
        assert!(matches!(
            result,
            Err(CompactorError::CyclicParentReference(_))
        ));
    }

    #[test]
    fn test_builtin_parent_terminates_chain() {
        let mut store = AssetStore::new();
        store.add_model(
            "minecraft",
            "block/chest",
            ModelDefinition {
                parent: Some("builtin/entity".to_string()),
                textures: [("particle".to_string(), "block/oak_planks".to_string())]
                    .into_iter()
                    .collect(),
                elements: vec![],
            },
        );

        let resolver = ModelResolver::new(&store);
        let model = resolver.resolve("block/chest").unwrap();
        // No elements: this is what routes chests into the fallback cube.
        assert!(!model.has_elements());
    }
}
