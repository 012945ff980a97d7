//! # Schematic Compactor
//!
//! A Rust library that turns voxel-grid builds into compact,
//! renderer-ready JSON.
//!
//! ## Overview
//!
//! Every block in a region is resolved through its blockstate definition to
//! a model, the model's inheritance chain is flattened, symbolic texture
//! slots are bound to concrete texture URLs, and the resulting geometry is
//! simplified where possible. Blocks that end up with identical shapes are
//! grouped into a single record listing all their positions, with texture
//! locators interned into a per-region symbol table.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schematic_compactor::{load_asset_store, Build, Compactor, MemoryRegion};
//!
//! // Load blockstates, models and textures (ZIP or directory).
//! let store = load_asset_store("path/to/assets.zip")?;
//!
//! // Describe the build.
//! let mut build = Build::new("author", "my build");
//! build.add_region("main", my_region);
//!
//! // Compact it.
//! let document = Compactor::new(store).compact(&build)?;
//! let json = serde_json::to_string(&document)?;
//! ```
//!
//! ## Library Integration
//!
//! To feed blocks from existing storage, implement the [`RegionSource`]
//! trait and call [`Compactor::compact_region`] directly.

pub mod assembler;
pub mod asset_store;
pub mod compactor;
pub mod error;
pub mod geometry;
pub mod output;
pub mod region;
pub mod resolver;
pub mod simplify;
pub mod types;

// Re-export main types for convenience
pub use asset_store::{AssetStore, BlockstateDefinition, ModelDefinition};
pub use compactor::{Compactor, CompactorConfig};
pub use error::{CompactorError, Result};
pub use geometry::{BlockShape, ResolvedBlock, ResolvedElement};
pub use output::{OutputBlock, OutputDocument, OutputRegion};
pub use region::{Build, MemoryRegion, RegionBounds, RegionSource};
pub use resolver::{ModelResolver, StateResolver};
pub use types::{Axis, BlockPosition, BlockTransform, Direction, InputBlock, TileEntity};

/// Load an asset store from a file path (ZIP or directory).
pub fn load_asset_store<P: AsRef<std::path::Path>>(path: P) -> Result<AssetStore> {
    asset_store::loader::load_from_path(path)
}

/// Load an asset store from in-memory ZIP bytes.
pub fn load_asset_store_from_bytes(data: &[u8]) -> Result<AssetStore> {
    asset_store::loader::load_from_bytes(data)
}
