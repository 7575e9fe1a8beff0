//! Chunk meshing - turns the voxel grid into renderable geometry

pub mod batch;
pub mod face;
pub mod geometry;
pub mod mesher;

pub use batch::{ChunkBuildQueue, mesh_world, mesh_world_sequential};
pub use face::{FACE_INDICES, FACES, FaceDescriptor};
pub use geometry::{ChunkMesh, Geometry};
pub use mesher::{ChunkMesher, build_chunk, face_visible};
