mod config;
mod map;

use anyhow::{Context, Result};
use blockvale_core::mesh::mesh_world_sequential;
use blockvale_core::{BlockType, ChunkCoord, ChunkMesh, World, WorldGenerator, mesh_world};
use clap::{Parser, Subcommand};
use crate::config::AppConfig;
use crate::map::MapMode;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides the config file)
    #[arg(long, global = true, allow_hyphen_values = true)]
    seed: Option<i32>,

    /// Worldgen preset: default, flat, cave_heavy, archipelago
    #[arg(long, global = true)]
    preset: Option<String>,

    /// RON file with a full worldgen configuration (takes precedence over --preset)
    #[arg(long, global = true)]
    worldgen: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a world and print the generation report
    Generate {
        /// Also print how many voxels of each block kind exist
        #[arg(long)]
        histogram: bool,
    },

    /// Generate a world and mesh every chunk
    Mesh {
        /// Mesh on the current thread only
        #[arg(long)]
        sequential: bool,
    },

    /// Write a top-down PNG preview
    Map {
        /// Output path
        #[arg(long, default_value = "map.png")]
        output: PathBuf,

        /// Color columns by biome instead of by surface block
        #[arg(long)]
        biomes: bool,

        /// Pixels per column (overrides the config file)
        #[arg(long)]
        scale: Option<u32>,
    },

    /// Print the effective worldgen configuration as RON
    Config {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut app_config = AppConfig::load()?;
    if let Some(seed) = args.seed {
        app_config.seed = seed;
    }
    if let Some(preset) = &args.preset {
        app_config.preset = preset.clone();
    }
    if let Some(path) = &args.worldgen {
        app_config.worldgen = Some(path.clone());
    }

    match args.command {
        Command::Generate { histogram } => run_generate(&app_config, histogram),
        Command::Mesh { sequential } => run_mesh(&app_config, sequential),
        Command::Map {
            output,
            biomes,
            scale,
        } => run_map(&app_config, output, biomes, scale),
        Command::Config { output } => run_config(&app_config, output),
    }
}

fn run_generate(app_config: &AppConfig, histogram: bool) -> Result<()> {
    let worldgen = app_config.worldgen_config()?;
    log::info!(
        "Generating '{}' with seed {}",
        worldgen.name,
        app_config.seed
    );

    let start = Instant::now();
    let world = World::from_config(app_config.seed, worldgen);
    let elapsed = start.elapsed();

    let dims = world.dims();
    println!(
        "{}x{}x{} world, seed {}, generated in {:.2?}",
        dims.width,
        dims.height,
        dims.depth,
        world.seed(),
        elapsed
    );
    println!("{}", world.report());

    if histogram {
        println!("blocks:");
        let counts = world.grid().histogram();
        for block in BlockType::ALL {
            let count = counts[block as usize];
            if count > 0 {
                println!("  {:<12} {:>9}", block, count);
            }
        }
    }
    Ok(())
}

fn run_mesh(app_config: &AppConfig, sequential: bool) -> Result<()> {
    let worldgen = app_config.worldgen_config()?;
    let atlas = app_config.grid_atlas()?;
    let world = World::from_config(app_config.seed, worldgen);

    let parallel = app_config.meshing.parallel && !sequential;
    let start = Instant::now();
    let meshes: Vec<(ChunkCoord, ChunkMesh)> = if parallel {
        mesh_world(world.grid(), &atlas)
    } else {
        mesh_world_sequential(world.grid(), &atlas)
    };
    let elapsed = start.elapsed();

    let (mut solid_faces, mut solid_tris) = (0, 0);
    let (mut liquid_faces, mut liquid_tris) = (0, 0);
    let mut empty = 0;
    for (_, mesh) in &meshes {
        if let Some(solid) = &mesh.solid {
            solid_faces += solid.face_count();
            solid_tris += solid.triangle_count();
        }
        if let Some(liquid) = &mesh.liquid {
            liquid_faces += liquid.face_count();
            liquid_tris += liquid.triangle_count();
        }
        if mesh.is_empty() {
            empty += 1;
        }
    }

    println!(
        "{} chunks meshed {} in {:.2?} ({} empty)",
        meshes.len(),
        if parallel { "in parallel" } else { "sequentially" },
        elapsed,
        empty
    );
    println!("  solid:  {:>8} faces {:>9} triangles", solid_faces, solid_tris);
    println!("  liquid: {:>8} faces {:>9} triangles", liquid_faces, liquid_tris);
    Ok(())
}

fn run_map(app_config: &AppConfig, output: PathBuf, biomes: bool, scale: Option<u32>) -> Result<()> {
    let worldgen = app_config.worldgen_config()?;
    let generator = WorldGenerator::from_config(app_config.seed, worldgen);
    let grid = generator.generate();

    let mode = if biomes {
        MapMode::Biomes
    } else {
        MapMode::Surface {
            shade_height: app_config.map.shade_height,
        }
    };
    let image = map::render_map(
        &grid,
        &generator,
        mode,
        scale.unwrap_or(app_config.map.scale),
    )?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    map::save_map(&image, &output)
        .with_context(|| format!("Failed to write map to {:?}", output))?;
    log::info!(
        "Saved {}x{} map to {:?}",
        image.width(),
        image.height(),
        output
    );
    Ok(())
}

fn run_config(app_config: &AppConfig, output: Option<PathBuf>) -> Result<()> {
    let worldgen = app_config.worldgen_config()?;
    match output {
        Some(path) => {
            worldgen
                .save_ron_file(&path)
                .with_context(|| format!("Failed to write {:?}", path))?;
            log::info!("Wrote worldgen config to {:?}", path);
        }
        None => {
            let text = worldgen
                .to_ron_string()
                .context("Failed to serialize worldgen config")?;
            println!("{}", text);
        }
    }
    Ok(())
}
