//! Per-chunk surface extraction
//!
//! Walks every voxel in a chunk's column footprint and emits the faces that
//! border something see-through. Solid and liquid blocks go to separate
//! streams so the renderer can give water its own material.

use crate::mesh::face::FACES;
use crate::mesh::geometry::{ChunkMesh, Geometry};
use crate::world::{CHUNK_SIZE, VoxelGrid};
use blockvale_blocks::{BlockType, UvLookup};
use glam::Vec3;

/// Whether a face of `current` bordering `neighbour` is visible
///
/// Faces pointing out of the world are always drawn. A liquid shows a face
/// only against air or a different non-liquid transparent block, which drops
/// the faces between two water blocks. Anything else shows a face whenever the
/// neighbour is transparent.
pub fn face_visible(current: BlockType, neighbour: BlockType, neighbour_in_world: bool) -> bool {
    if !neighbour_in_world {
        return true;
    }
    if current.is_liquid() {
        neighbour.is_air()
            || (neighbour != current && !neighbour.is_liquid() && neighbour.is_transparent())
    } else {
        neighbour.is_transparent()
    }
}

/// Builds chunk geometry using a texture atlas
pub struct ChunkMesher<A> {
    atlas: A,
}

impl<A: UvLookup> ChunkMesher<A> {
    pub fn new(atlas: A) -> Self {
        Self { atlas }
    }

    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    /// Mesh chunk `(chunk_x, chunk_z)`
    ///
    /// Columns outside the world are skipped, so a chunk lying entirely
    /// outside yields no geometry in either stream.
    pub fn build(&self, grid: &VoxelGrid, chunk_x: i32, chunk_z: i32) -> ChunkMesh {
        let mut solid = Geometry::default();
        let mut liquid = Geometry::default();

        let x0 = chunk_x.saturating_mul(CHUNK_SIZE);
        let z0 = chunk_z.saturating_mul(CHUNK_SIZE);

        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let wx = x0.saturating_add(lx);
                let wz = z0.saturating_add(lz);
                if wx < 0 || wz < 0 || wx >= grid.width() || wz >= grid.depth() {
                    continue;
                }

                for y in 0..grid.height() {
                    let block = grid.get_block(wx, y, wz);
                    if block.is_air() {
                        continue;
                    }

                    let target = if block.is_liquid() {
                        &mut liquid
                    } else {
                        &mut solid
                    };
                    let origin = Vec3::new(wx as f32, y as f32, wz as f32);

                    for face in &FACES {
                        let (nx, ny, nz) = (wx + face.dir.x, y + face.dir.y, wz + face.dir.z);
                        let in_world = grid.in_bounds(nx, ny, nz);
                        let neighbour = grid.get_block(nx, ny, nz);
                        if face_visible(block, neighbour, in_world) {
                            let uv = self.atlas.uv_for(block.texture(face.slot));
                            target.push_face(origin, face, uv);
                        }
                    }
                }
            }
        }

        ChunkMesh {
            solid: (!solid.is_empty()).then_some(solid),
            liquid: (!liquid.is_empty()).then_some(liquid),
        }
    }
}

/// Mesh one chunk with the given atlas
pub fn build_chunk(
    grid: &VoxelGrid,
    chunk_x: i32,
    chunk_z: i32,
    atlas: &impl UvLookup,
) -> ChunkMesh {
    ChunkMesher::new(atlas).build(grid, chunk_x, chunk_z)
}
