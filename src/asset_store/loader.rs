//! Asset store loading from ZIP archives and directories.
//!
//! Both layouts follow the client asset convention:
//! `assets/{namespace}/{blockstates,models,textures}/...`. Documents that
//! fail to parse are skipped with a warning; the store itself must exist and
//! be well-formed or loading fails.

use super::{AssetStore, BlockstateDefinition, ModelDefinition};
use crate::error::{CompactorError, Result};
use log::warn;
use std::io::Read;
use std::path::Path;

/// Load an asset store from a file path.
///
/// Supports both ZIP files and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<AssetStore> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load an asset store from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<AssetStore> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut store = AssetStore::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let file_path = file.name().to_string();

        if file.is_dir() {
            continue;
        }

        let Some((namespace, asset_type, asset_path)) = parse_asset_path(&file_path) else {
            continue;
        };

        match asset_type {
            "blockstates" => {
                if asset_path.ends_with(".json") {
                    let mut contents = String::new();
                    file.read_to_string(&mut contents)?;

                    let block_id = asset_path.trim_end_matches(".json");
                    match serde_json::from_str::<BlockstateDefinition>(&contents) {
                        Ok(def) => store.add_blockstate(namespace, block_id, def),
                        Err(e) => {
                            warn!("skipping blockstate {}/{}: {}", namespace, block_id, e);
                        }
                    }
                }
            }
            "models" => {
                if asset_path.ends_with(".json") {
                    let mut contents = String::new();
                    file.read_to_string(&mut contents)?;

                    let model_path = asset_path.trim_end_matches(".json");
                    match serde_json::from_str::<ModelDefinition>(&contents) {
                        Ok(model) => store.add_model(namespace, model_path, model),
                        Err(e) => {
                            warn!("skipping model {}/{}: {}", namespace, model_path, e);
                        }
                    }
                }
            }
            "textures" => {
                if asset_path.ends_with(".png") {
                    store.add_texture(namespace, asset_path.trim_end_matches(".png"));
                }
            }
            _ => {}
        }
    }

    Ok(store)
}

/// Load an asset store from a directory.
fn load_from_directory(path: &Path) -> Result<AssetStore> {
    let mut store = AssetStore::new();

    let assets_path = path.join("assets");
    if !assets_path.exists() {
        return Err(CompactorError::InvalidAssetStore(
            "No assets directory found".to_string(),
        ));
    }

    for namespace_entry in std::fs::read_dir(&assets_path)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }

        let namespace = namespace_entry.file_name().to_string_lossy().to_string();
        let namespace_path = namespace_entry.path();

        let blockstates_path = namespace_path.join("blockstates");
        if blockstates_path.exists() {
            load_files_recursive(&blockstates_path, &blockstates_path, "json", &mut |block_id, file| {
                let contents = std::fs::read_to_string(file)?;
                match serde_json::from_str::<BlockstateDefinition>(&contents) {
                    Ok(def) => store.add_blockstate(&namespace, block_id, def),
                    Err(e) => warn!("skipping blockstate {}/{}: {}", namespace, block_id, e),
                }
                Ok(())
            })?;
        }

        let models_path = namespace_path.join("models");
        if models_path.exists() {
            load_files_recursive(&models_path, &models_path, "json", &mut |model_path, file| {
                let contents = std::fs::read_to_string(file)?;
                match serde_json::from_str::<ModelDefinition>(&contents) {
                    Ok(model) => store.add_model(&namespace, model_path, model),
                    Err(e) => warn!("skipping model {}/{}: {}", namespace, model_path, e),
                }
                Ok(())
            })?;
        }

        let textures_path = namespace_path.join("textures");
        if textures_path.exists() {
            load_files_recursive(&textures_path, &textures_path, "png", &mut |texture_path, _file| {
                store.add_texture(&namespace, texture_path);
                Ok(())
            })?;
        }
    }

    Ok(store)
}

/// Parse an asset path from a ZIP archive.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Walk a directory recursively, invoking the handler with each file's path
/// relative to `base` (extension stripped, forward slashes).
fn load_files_recursive<F>(base: &Path, dir: &Path, extension: &str, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &Path) -> Result<()>,
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            load_files_recursive(base, &path, extension, handler)?;
        } else if path.extension().map(|e| e == extension).unwrap_or(false) {
            let relative = path
                .strip_prefix(base)
                .unwrap_or(&path)
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");

            handler(&relative, &path)?;
        }
    }
    Ok(())
}
