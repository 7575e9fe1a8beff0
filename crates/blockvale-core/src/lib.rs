//! Procedural voxel world generation and chunk meshing
//!
//! - `noise`: seeded gradient noise fields
//! - `world`: the voxel grid, world generation pipeline and edit session
//! - `mesh`: per-chunk surface extraction into solid and liquid geometry

pub mod mesh;
pub mod noise;
pub mod world;

pub use blockvale_blocks as blocks;
pub use blockvale_blocks::{BlockType, GridAtlas, UvLookup, UvRect};
pub use mesh::{ChunkBuildQueue, ChunkMesh, ChunkMesher, Geometry, mesh_world};
pub use noise::NoiseField;
pub use world::{
    Biome, CHUNK_SIZE, ChunkCoord, GenerationReport, SEA_LEVEL, VoxelGrid, WORLD_DEPTH,
    WORLD_HEIGHT, WORLD_WIDTH, World, WorldDims, WorldGenConfig, WorldGenerator,
};
