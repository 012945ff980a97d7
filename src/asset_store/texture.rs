//! Texture catalog: existence checks and URL locators.
//!
//! The engine never reads pixel data. It only needs to know whether a texture
//! id is backed by a file, and the URL under which the hosting layer serves
//! that file.

use std::collections::HashSet;

/// Known texture paths for one namespace.
#[derive(Debug, Default, Clone)]
pub struct TextureCatalog {
    paths: HashSet<String>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture path (without extension), e.g. "block/stone".
    pub fn insert(&mut self, path: &str) {
        self.paths.insert(path.to_string());
    }

    /// Check whether a texture path is backed by a file.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Build the URL a texture is served under.
///
/// The hosting layer mirrors the store layout, so the locator is just
/// `{base}/{namespace}/{path}.png` with a normalized base.
pub fn texture_url(base_url: &str, namespace: &str, path: &str) -> String {
    format!("{}/{}/{}.png", base_url.trim_end_matches('/'), namespace, path)
}
