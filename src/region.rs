//! Region sources.
//!
//! A region is a bounded voxel grid that the compactor traverses in a fixed
//! order. [`RegionSource`] abstracts over storage so alternative backends can
//! feed the engine; [`MemoryRegion`] is the in-memory implementation used by
//! [`Build`] inputs.

use crate::types::{BlockPosition, InputBlock, TileEntity};
use std::collections::{BTreeMap, HashMap};

/// Inclusive bounds of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub min: BlockPosition,
    pub max: BlockPosition,
}

/// A bounded voxel grid the compactor can traverse.
pub trait RegionSource {
    /// Inclusive bounds, or `None` when the region holds no blocks.
    fn bounds(&self) -> Option<RegionBounds>;

    /// The block at `position`, if one is present.
    fn block_at(&self, position: BlockPosition) -> Option<&InputBlock>;

    /// Tile entity payloads keyed by block identifier.
    fn tile_entities(&self) -> &HashMap<String, TileEntity>;
}

/// Sparse in-memory region.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegion {
    blocks: HashMap<BlockPosition, InputBlock>,
    tile_entities: HashMap<String, TileEntity>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, position: BlockPosition, block: InputBlock) {
        self.blocks.insert(position, block);
    }

    pub fn add_tile_entity(&mut self, entity: TileEntity) {
        self.tile_entities.insert(entity.id.clone(), entity);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl RegionSource for MemoryRegion {
    fn bounds(&self) -> Option<RegionBounds> {
        let mut positions = self.blocks.keys();
        let first = *positions.next()?;
        let (mut min, mut max) = (first, first);
        for position in positions {
            min.x = min.x.min(position.x);
            min.y = min.y.min(position.y);
            min.z = min.z.min(position.z);
            max.x = max.x.max(position.x);
            max.y = max.y.max(position.y);
            max.z = max.z.max(position.z);
        }
        Some(RegionBounds { min, max })
    }

    fn block_at(&self, position: BlockPosition) -> Option<&InputBlock> {
        self.blocks.get(&position)
    }

    fn tile_entities(&self) -> &HashMap<String, TileEntity> {
        &self.tile_entities
    }
}

/// A named build: metadata plus one or more regions.
#[derive(Debug, Clone, Default)]
pub struct Build {
    pub author: String,
    pub name: String,
    pub regions: BTreeMap<String, MemoryRegion>,
}

impl Build {
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Self {
        Build {
            author: author.into(),
            name: name.into(),
            regions: BTreeMap::new(),
        }
    }

    pub fn add_region(&mut self, name: impl Into<String>, region: MemoryRegion) {
        self.regions.insert(name.into(), region);
    }
}
