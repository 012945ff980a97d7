//! Schematic Compactor CLI
//!
//! Convert voxel-grid builds into compact renderer-ready JSON.

use clap::{Parser, Subcommand};
use schematic_compactor::{
    load_asset_store, Build, Compactor, CompactorConfig, MemoryRegion,
};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schematic-compactor")]
#[command(author, version, about = "Convert voxel builds into compact renderer JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compact a single block (useful for testing)
    Block {
        /// Block name (e.g., "minecraft:stone" or "stone")
        #[arg(short, long)]
        block: String,

        /// Block properties as key=value pairs (e.g., "facing=north")
        #[arg(short, long, value_parser = parse_property)]
        property: Vec<(String, String)>,

        /// Path to client assets (ZIP or directory)
        #[arg(short, long)]
        assets: PathBuf,

        /// Output file path, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compact a build from a JSON input file
    Compact {
        /// Input JSON file containing the build
        #[arg(short, long)]
        input: PathBuf,

        /// Path to client assets (ZIP or directory)
        #[arg(short, long)]
        assets: PathBuf,

        /// Output file path, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RNG seed for random variant selection
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Base URL textures are served from
        #[arg(long, default_value = "/textures")]
        base_url: String,

        /// Texture used for blocks whose models have no elements
        #[arg(long, default_value = "minecraft:block/yellow_wool")]
        fallback_texture: String,
    },

    /// Show information about a set of client assets
    Info {
        /// Path to client assets (ZIP or directory)
        #[arg(short, long)]
        assets: PathBuf,
    },
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid property format: '{}'. Use key=value", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Block {
            block,
            property,
            assets,
            output,
        } => {
            compact_single_block(&block, property, &assets, output.as_deref())?;
        }
        Commands::Compact {
            input,
            assets,
            output,
            seed,
            base_url,
            fallback_texture,
        } => {
            compact_from_json(
                &input,
                &assets,
                output.as_deref(),
                seed,
                base_url,
                fallback_texture,
            )?;
        }
        Commands::Info { assets } => {
            show_store_info(&assets)?;
        }
    }

    Ok(())
}

fn compact_single_block(
    block_name: &str,
    properties: Vec<(String, String)>,
    assets_path: &std::path::Path,
    output_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Loading assets from {:?}...", assets_path);
    let store = load_asset_store(assets_path)?;
    eprintln!("  Found {} blockstates", store.blockstate_count());

    let block_name = normalize_name(block_name);
    let mut block = schematic_compactor::InputBlock::new(&block_name);
    for (key, value) in properties {
        block.properties.insert(key, value);
    }

    eprintln!("Compacting block: {} {:?}", block_name, block.properties);

    let mut region = MemoryRegion::new();
    region.set_block(schematic_compactor::BlockPosition::new(0, 0, 0), block);

    let mut build = Build::new("", &block_name);
    build.add_region("block", region);

    let document = Compactor::new(store).compact(&build)?;
    write_document(&document, output_path)
}

fn compact_from_json(
    input_path: &std::path::Path,
    assets_path: &std::path::Path,
    output_path: Option<&std::path::Path>,
    seed: u64,
    base_url: String,
    fallback_texture: String,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Loading assets from {:?}...", assets_path);
    let store = load_asset_store(assets_path)?.with_texture_base_url(base_url);
    eprintln!("  Found {} blockstates", store.blockstate_count());

    eprintln!("Loading build from {:?}...", input_path);
    let json_content = fs::read_to_string(input_path)?;
    let input: BuildInput = serde_json::from_str(&json_content)?;
    let build = input.into_build();
    eprintln!("  Loaded {} regions", build.regions.len());

    let config = CompactorConfig {
        seed,
        fallback_texture,
    };
    let document = Compactor::with_config(store, config).compact(&build)?;

    let records: usize = document.regions.values().map(|r| r.blocks.len()).sum();
    let textures: usize = document.regions.values().map(|r| r.textures.len()).sum();
    eprintln!("  Produced {} block records, {} texture symbols", records, textures);

    write_document(&document, output_path)
}

fn show_store_info(assets_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Loading assets from {:?}...", assets_path);
    let store = load_asset_store(assets_path)?;

    println!("\nAsset Store Info:");
    println!("  Blockstates: {}", store.blockstate_count());
    println!("  Models: {}", store.model_count());
    println!("  Textures: {}", store.texture_count());

    Ok(())
}

fn write_document(
    document: &schematic_compactor::OutputDocument,
    output_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(document)?;
    match output_path {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("Wrote {} bytes to {:?}", json.len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn normalize_name(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("minecraft:{}", name)
    }
}

// JSON input format
#[derive(serde::Deserialize)]
struct BuildInput {
    #[serde(default)]
    author: String,
    #[serde(default)]
    name: String,
    regions: HashMap<String, RegionInput>,
}

#[derive(serde::Deserialize)]
struct RegionInput {
    blocks: Vec<BlockEntry>,
    #[serde(default)]
    tile_entities: Vec<TileEntityEntry>,
}

#[derive(serde::Deserialize)]
struct BlockEntry {
    x: i32,
    y: i32,
    z: i32,
    name: String,
    #[serde(default)]
    properties: HashMap<String, String>,
}

#[derive(serde::Deserialize)]
struct TileEntityEntry {
    id: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl BuildInput {
    fn into_build(self) -> Build {
        use schematic_compactor::{BlockPosition, InputBlock, TileEntity};

        let mut build = Build::new(self.author, self.name);
        for (region_name, region_input) in self.regions {
            let mut region = MemoryRegion::new();
            for entry in region_input.blocks {
                let mut block = InputBlock::new(normalize_name(&entry.name));
                block.properties = entry.properties;
                region.set_block(BlockPosition::new(entry.x, entry.y, entry.z), block);
            }
            for entry in region_input.tile_entities {
                let mut tile_entity = TileEntity::new(normalize_name(&entry.id));
                tile_entity.data = entry.data;
                region.add_tile_entity(tile_entity);
            }
            build.add_region(region_name, region);
        }
        build
    }
}
