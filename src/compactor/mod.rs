//! The compaction engine.
//!
//! Drives the full per-region pipeline: traverse the voxel grid in a fixed
//! order, resolve every block through blockstate -> model -> textures,
//! assemble and simplify its geometry, then deduplicate. Identical canonical
//! shapes collapse into a single record listing every position, and texture
//! locators are interned into a per-region symbol table.

use crate::assembler::{assemble_elements, fallback_cube};
use crate::asset_store::AssetStore;
use crate::error::Result;
use crate::geometry::{BlockShape, ResolvedBlock};
use crate::output::{OutputBlock, OutputDocument, OutputRegion};
use crate::region::{Build, RegionSource};
use crate::resolver::{resolve_textures, ModelResolver, ResolvedModel, StateResolver};
use crate::simplify::simplify_block;
use crate::types::{BlockPosition, BlockTransform, Direction, InputBlock, TileEntity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct CompactorConfig {
    /// RNG seed for random variant choice. Each region restarts from this
    /// seed, so a region's output depends only on its own contents.
    pub seed: u64,
    /// Texture substituted for blocks whose models declare no elements.
    pub fallback_texture: String,
}

impl Default for CompactorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            fallback_texture: "minecraft:block/yellow_wool".to_string(),
        }
    }
}

/// The compaction engine: an asset store plus configuration.
pub struct Compactor {
    store: AssetStore,
    config: CompactorConfig,
}

impl Compactor {
    pub fn new(store: AssetStore) -> Self {
        Self::with_config(store, CompactorConfig::default())
    }

    pub fn with_config(store: AssetStore, config: CompactorConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Compact every region of a build into one output document.
    pub fn compact(&self, build: &Build) -> Result<OutputDocument> {
        let mut regions = BTreeMap::new();
        for (name, region) in &build.regions {
            log::debug!("compacting region '{}' ({} blocks)", name, region.len());
            regions.insert(name.clone(), self.compact_region(region)?);
        }

        Ok(OutputDocument {
            author: build.author.clone(),
            name: build.name.clone(),
            regions,
        })
    }

    /// Compact a single region.
    ///
    /// Traversal is x-outer, y-middle, z-inner over the region bounds, so
    /// position lists and symbol numbering come out identical across runs
    /// with the same seed.
    pub fn compact_region(&self, source: &dyn RegionSource) -> Result<OutputRegion> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let state_resolver = StateResolver::new(&self.store);
        let model_resolver = ModelResolver::new(&self.store);
        let mut grouper = RegionCompactor::new();

        if let Some(bounds) = source.bounds() {
            for x in bounds.min.x..=bounds.max.x {
                for y in bounds.min.y..=bounds.max.y {
                    for z in bounds.min.z..=bounds.max.z {
                        let position = BlockPosition::new(x, y, z);
                        let Some(block) = source.block_at(position) else {
                            continue;
                        };
                        if block.is_air() {
                            continue;
                        }

                        let (shape, transform) = self.resolve_block(
                            block,
                            source.tile_entities(),
                            &state_resolver,
                            &model_resolver,
                            &mut rng,
                        )?;

                        grouper.add_block(ResolvedBlock {
                            position,
                            shape,
                            connected_sides: block.connected_sides(),
                            transform,
                        });
                    }
                }
            }
        }

        Ok(grouper.finish())
    }

    /// Resolve one block to its canonical shape and block-level transform.
    fn resolve_block(
        &self,
        block: &InputBlock,
        tile_entities: &HashMap<String, TileEntity>,
        state_resolver: &StateResolver<'_>,
        model_resolver: &ModelResolver<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Result<(BlockShape, Option<BlockTransform>)> {
        let variants = state_resolver.resolve(block, rng)?;

        let mut elements = Vec::new();
        let mut transform = BlockTransform::default();

        for variant in &variants {
            let model = model_resolver.resolve(&variant.model_location())?;
            let variant_transform = BlockTransform::new(variant.x, variant.y, variant.uvlock);

            // Multipart can stack several rotated parts; the record carries
            // one transform, taken from the first part that has one.
            if transform.is_identity() {
                transform = variant_transform;
            }

            // Elementless models (builtin/ parents) skip texture resolution
            // entirely: their maps may carry unbound indirections, and the
            // fallback cube replaces the map wholesale anyway.
            if !model.has_elements() {
                continue;
            }

            let textures = resolve_textures(&self.store, &model.textures)?;
            let resolved = ResolvedModel {
                model,
                textures,
                transform: variant_transform,
            };
            elements.extend(assemble_elements(&resolved.model, &resolved.textures)?);
        }

        if elements.is_empty() {
            elements = fallback_cube(
                block,
                tile_entities,
                &self.store,
                &self.config.fallback_texture,
            )?;
        }

        let shape = simplify_block(elements);
        let transform = (!transform.is_identity()).then_some(transform);
        Ok((shape, transform))
    }
}

/// Everything but position that distinguishes one record from another.
type GroupKey = (BlockShape, Vec<Direction>, Option<BlockTransform>);

/// Per-region accumulator: texture interning plus shape grouping.
///
/// Symbols are interned before hashing, so two blocks sharing a texture
/// compare equal through its symbol and the grouping stays injective: one
/// symbol per distinct locator, one record per distinct key.
struct RegionCompactor {
    /// Locator -> symbol.
    symbols: HashMap<String, String>,
    /// Symbol -> locator, in symbol order.
    table: BTreeMap<String, String>,
    /// Group key -> index into `records`.
    groups: HashMap<GroupKey, usize>,
    /// Records in first-encounter order.
    records: Vec<(GroupKey, Vec<BlockPosition>)>,
}

impl RegionCompactor {
    fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            table: BTreeMap::new(),
            groups: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Intern a texture locator, assigning "t0", "t1", ... on first sight.
    fn intern(&mut self, locator: &str) -> String {
        if let Some(symbol) = self.symbols.get(locator) {
            return symbol.clone();
        }
        let symbol = format!("t{}", self.symbols.len());
        self.symbols.insert(locator.to_string(), symbol.clone());
        self.table.insert(symbol.clone(), locator.to_string());
        symbol
    }

    /// Replace every texture locator in the shape with its symbol.
    fn intern_shape(&mut self, shape: &mut BlockShape) {
        match shape {
            BlockShape::Uniform { texture, .. } => {
                *texture = self.intern(texture);
            }
            BlockShape::Elements(elements) => {
                for element in elements {
                    for face in element.faces.iter_mut() {
                        face.texture = self.intern(&face.texture);
                    }
                }
            }
        }
    }

    fn add_block(&mut self, mut block: ResolvedBlock) {
        self.intern_shape(&mut block.shape);

        let key = (block.shape, block.connected_sides, block.transform);
        match self.groups.get(&key) {
            Some(&index) => self.records[index].1.push(block.position),
            None => {
                self.groups.insert(key.clone(), self.records.len());
                self.records.push((key, vec![block.position]));
            }
        }
    }

    fn finish(self) -> OutputRegion {
        let blocks = self
            .records
            .into_iter()
            .map(|((shape, connected_sides, transform), positions)| {
                OutputBlock::from_group(shape, connected_sides, transform, positions)
            })
            .collect();

        OutputRegion {
            textures: self.table,
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_store::{AssetStore, BlockstateDefinition, ModelDefinition};
    use crate::error::CompactorError;
    use crate::region::MemoryRegion;

    fn state(json: serde_json::Value) -> BlockstateDefinition {
        serde_json::from_value(json).unwrap()
    }

    fn model(json: serde_json::Value) -> ModelDefinition {
        serde_json::from_value(json).unwrap()
    }

    fn cube_all_store() -> AssetStore {
        let mut store = AssetStore::new();
        store.add_model(
            "minecraft",
            "block/cube_all",
            model(serde_json::json!({
                "elements": [{
                    "from": [0.0, 0.0, 0.0],
                    "to": [16.0, 16.0, 16.0],
                    "faces": {
                        "down":  { "texture": "#all", "cullface": "down" },
                        "up":    { "texture": "#all", "cullface": "up" },
                        "north": { "texture": "#all", "cullface": "north" },
                        "south": { "texture": "#all", "cullface": "south" },
                        "west":  { "texture": "#all", "cullface": "west" },
                        "east":  { "texture": "#all", "cullface": "east" }
                    }
                }]
            })),
        );
        store
    }

    fn add_cube_block(store: &mut AssetStore, id: &str) {
        store.add_blockstate(
            "minecraft",
            id,
            state(serde_json::json!({
                "variants": { "": { "model": format!("block/{id}") } }
            })),
        );
        store.add_model(
            "minecraft",
            &format!("block/{id}"),
            model(serde_json::json!({
                "parent": "block/cube_all",
                "textures": { "all": format!("block/{id}") }
            })),
        );
        store.add_texture("minecraft", &format!("block/{id}"));
    }

    fn stone_region(positions: &[(i32, i32, i32)]) -> MemoryRegion {
        let mut region = MemoryRegion::new();
        for &(x, y, z) in positions {
            region.set_block(
                BlockPosition::new(x, y, z),
                InputBlock::new("minecraft:stone"),
            );
        }
        region
    }

    #[test]
    fn test_identical_blocks_share_one_record() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");

        let compactor = Compactor::new(store);
        let region = compactor
            .compact_region(&stone_region(&[(0, 0, 0), (1, 0, 0)]))
            .unwrap();

        assert_eq!(region.blocks.len(), 1);
        assert_eq!(
            region.textures,
            [(
                "t0".to_string(),
                "/textures/minecraft/block/stone.png".to_string()
            )]
            .into_iter()
            .collect()
        );

        let json = serde_json::to_value(&region.blocks[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "texture": "t0",
                "positions": [[0, 0, 0], [1, 0, 0]]
            })
        );
    }

    #[test]
    fn test_traversal_order_is_x_outer_z_inner() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");

        let compactor = Compactor::new(store);
        let region = compactor
            .compact_region(&stone_region(&[(1, 0, 0), (0, 1, 0), (0, 0, 1), (0, 0, 0)]))
            .unwrap();

        let json = serde_json::to_value(&region.blocks[0]).unwrap();
        assert_eq!(
            json["positions"],
            serde_json::json!([[0, 0, 0], [0, 0, 1], [0, 1, 0], [1, 0, 0]])
        );
    }

    #[test]
    fn test_symbols_assigned_in_encounter_order() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");
        add_cube_block(&mut store, "dirt");

        let mut region = MemoryRegion::new();
        region.set_block(BlockPosition::new(0, 0, 0), InputBlock::new("minecraft:dirt"));
        region.set_block(BlockPosition::new(1, 0, 0), InputBlock::new("minecraft:stone"));
        region.set_block(BlockPosition::new(2, 0, 0), InputBlock::new("minecraft:dirt"));

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&region).unwrap();

        assert_eq!(output.blocks.len(), 2);
        assert_eq!(
            output.textures,
            [
                (
                    "t0".to_string(),
                    "/textures/minecraft/block/dirt.png".to_string()
                ),
                (
                    "t1".to_string(),
                    "/textures/minecraft/block/stone.png".to_string()
                ),
            ]
            .into_iter()
            .collect()
        );
    }

    #[test]
    fn test_air_blocks_are_skipped() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");

        let mut region = stone_region(&[(0, 0, 0), (2, 0, 0)]);
        region.set_block(BlockPosition::new(1, 0, 0), InputBlock::new("minecraft:air"));

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&region).unwrap();

        assert_eq!(output.blocks.len(), 1);
        let json = serde_json::to_value(&output.blocks[0]).unwrap();
        assert_eq!(json["positions"], serde_json::json!([[0, 0, 0], [2, 0, 0]]));
    }

    #[test]
    fn test_connected_sides_split_groups() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");

        let mut region = stone_region(&[(0, 0, 0)]);
        region.set_block(
            BlockPosition::new(1, 0, 0),
            InputBlock::new("minecraft:stone").with_property("north", "true"),
        );

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&region).unwrap();

        // Same shape and texture, but differing connection state keeps the
        // records apart.
        assert_eq!(output.blocks.len(), 2);
        assert_eq!(output.textures.len(), 1);
    }

    #[test]
    fn test_elementless_block_gets_fallback_cube() {
        let mut store = cube_all_store();
        store.add_blockstate(
            "minecraft",
            "chest",
            state(serde_json::json!({
                "variants": { "": { "model": "block/chest" } }
            })),
        );
        store.add_model(
            "minecraft",
            "block/chest",
            model(serde_json::json!({ "parent": "builtin/entity" })),
        );
        store.add_texture("minecraft", "block/yellow_wool");

        let mut region = MemoryRegion::new();
        region.set_block(BlockPosition::new(0, 0, 0), InputBlock::new("minecraft:chest"));
        region.add_tile_entity(TileEntity::new("minecraft:chest"));

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&region).unwrap();

        let json = serde_json::to_value(&output.blocks[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "texture": "t0",
                "uv": [16, 0, 0, 16],
                "positions": [[0, 0, 0]]
            })
        );
        assert_eq!(
            output.textures["t0"],
            "/textures/minecraft/block/yellow_wool.png"
        );
    }

    #[test]
    fn test_fallback_ignores_unbound_model_textures() {
        // Container models often declare indirections ("particle": "#texture")
        // that nothing ever binds. The fallback path must not try to resolve
        // them; the cube's own texture map replaces the model's wholesale.
        let mut store = cube_all_store();
        store.add_blockstate(
            "minecraft",
            "chest",
            state(serde_json::json!({
                "variants": { "": { "model": "block/chest" } }
            })),
        );
        store.add_model(
            "minecraft",
            "block/chest",
            model(serde_json::json!({
                "parent": "builtin/entity",
                "textures": { "particle": "#texture" }
            })),
        );
        store.add_texture("minecraft", "block/yellow_wool");

        let mut region = MemoryRegion::new();
        region.set_block(BlockPosition::new(0, 0, 0), InputBlock::new("minecraft:chest"));
        region.add_tile_entity(TileEntity::new("minecraft:chest"));

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&region).unwrap();

        let json = serde_json::to_value(&output.blocks[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "texture": "t0",
                "uv": [16, 0, 0, 16],
                "positions": [[0, 0, 0]]
            })
        );
        assert_eq!(
            output.textures["t0"],
            "/textures/minecraft/block/yellow_wool.png"
        );
    }

    #[test]
    fn test_elementless_block_without_tile_entity_fails() {
        let mut store = cube_all_store();
        store.add_blockstate(
            "minecraft",
            "chest",
            state(serde_json::json!({
                "variants": { "": { "model": "block/chest" } }
            })),
        );
        store.add_model(
            "minecraft",
            "block/chest",
            model(serde_json::json!({ "parent": "builtin/entity" })),
        );
        store.add_texture("minecraft", "block/yellow_wool");

        let mut region = MemoryRegion::new();
        region.set_block(BlockPosition::new(0, 0, 0), InputBlock::new("minecraft:chest"));

        let compactor = Compactor::new(store);
        assert!(matches!(
            compactor.compact_region(&region),
            Err(CompactorError::TileEntityNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_block_fails() {
        let compactor = Compactor::new(cube_all_store());
        let mut region = MemoryRegion::new();
        region.set_block(
            BlockPosition::new(0, 0, 0),
            InputBlock::new("minecraft:granite"),
        );

        assert!(matches!(
            compactor.compact_region(&region),
            Err(CompactorError::BlockstateNotFound(_))
        ));
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut store = cube_all_store();
        store.add_blockstate(
            "minecraft",
            "stone",
            state(serde_json::json!({
                "variants": {
                    "": [
                        { "model": "block/stone" },
                        { "model": "block/stone_mirrored" }
                    ]
                }
            })),
        );
        for id in ["stone", "stone_mirrored"] {
            store.add_model(
                "minecraft",
                &format!("block/{id}"),
                model(serde_json::json!({
                    "parent": "block/cube_all",
                    "textures": { "all": format!("block/{id}") }
                })),
            );
            store.add_texture("minecraft", &format!("block/{id}"));
        }

        let region = stone_region(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        let compactor = Compactor::with_config(
            store,
            CompactorConfig {
                seed: 7,
                ..CompactorConfig::default()
            },
        );

        let first = compactor.compact_region(&region).unwrap();
        let second = compactor.compact_region(&region).unwrap();
        assert_eq!(
            serde_json::to_value(&first.blocks).unwrap(),
            serde_json::to_value(&second.blocks).unwrap()
        );
        assert_eq!(first.textures, second.textures);
    }

    #[test]
    fn test_variant_transform_carried_on_record() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");
        store.add_blockstate(
            "minecraft",
            "stone",
            state(serde_json::json!({
                "variants": { "": { "model": "block/stone", "y": 90 } }
            })),
        );

        let compactor = Compactor::new(store);
        let output = compactor.compact_region(&stone_region(&[(0, 0, 0)])).unwrap();

        let json = serde_json::to_value(&output.blocks[0]).unwrap();
        assert_eq!(
            json["transformations"],
            serde_json::json!({ "x": 0, "y": 90, "uvlock": false })
        );
    }

    #[test]
    fn test_compact_build_keeps_region_names() {
        let mut store = cube_all_store();
        add_cube_block(&mut store, "stone");

        let mut build = Build::new("someone", "tower");
        build.add_region("base", stone_region(&[(0, 0, 0)]));
        build.add_region("roof", stone_region(&[(0, 4, 0)]));

        let compactor = Compactor::new(store);
        let document = compactor.compact(&build).unwrap();

        assert_eq!(document.author, "someone");
        assert_eq!(document.name, "tower");
        assert_eq!(
            document.regions.keys().cloned().collect::<Vec<_>>(),
            vec!["base".to_string(), "roof".to_string()]
        );
    }
}
