//! World management - voxel grid, generation pipeline and edit session

pub mod biome;
pub mod chunk;
pub mod features;
pub mod generation;
pub mod grid;
pub mod rng_trait;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;
pub mod worldgen_config;

pub use biome::{Biome, BiomeDefinition, BiomeThresholds};
pub use chunk::{CHUNK_SIZE, ChunkCoord, chunk_coords, chunk_extent, chunks_affected_by};
pub use generation::{Climate, ColumnMap, WorldGenerator, generate};
pub use grid::{SEA_LEVEL, VoxelGrid, WORLD_DEPTH, WORLD_HEIGHT, WORLD_WIDTH, WorldDims};
pub use rng_trait::{StageRng, WorldRng, stage_rng, voxel_rng};
pub use stats::GenerationReport;
pub use world::World;
pub use worldgen_config::{
    CaveLayer, CaveParams, ClimateParams, ConfigError, FbmLayer, NoiseBand, OreParams, OrePolicy,
    SeedOffsets, ShorelineParams, TerrainParams, VegetationParams, WorldGenConfig, WorldParams,
};
