//! Batched chunk rebuilds
//!
//! A driver meshing a whole world at once can use [`mesh_world`], which
//! spreads chunks over the rayon pool. A driver that must stay responsive
//! instead feeds a [`ChunkBuildQueue`] and drains a few chunks per frame.

use crate::mesh::geometry::ChunkMesh;
use crate::mesh::mesher::ChunkMesher;
use crate::world::{ChunkCoord, VoxelGrid, chunk_coords};
use blockvale_blocks::UvLookup;
use rayon::prelude::*;
use std::collections::{HashSet, VecDeque};

/// Mesh every chunk of the grid in parallel
///
/// Results come back in chunk scan order (z outer, x inner). Chunks with no
/// geometry are included so callers can clear stale meshes.
pub fn mesh_world<A>(grid: &VoxelGrid, atlas: &A) -> Vec<(ChunkCoord, ChunkMesh)>
where
    A: UvLookup + Sync,
{
    let mesher = ChunkMesher::new(atlas);
    let coords: Vec<ChunkCoord> = chunk_coords(&grid.dims()).collect();

    let meshes: Vec<(ChunkCoord, ChunkMesh)> = coords
        .par_iter()
        .map(|&coord| (coord, mesher.build(grid, coord.x, coord.z)))
        .collect();

    let faces: usize = meshes.iter().map(|(_, mesh)| mesh.face_count()).sum();
    log::info!("Meshed {} chunks, {} faces", meshes.len(), faces);
    meshes
}

/// Single-threaded counterpart of [`mesh_world`]
pub fn mesh_world_sequential(
    grid: &VoxelGrid,
    atlas: &impl UvLookup,
) -> Vec<(ChunkCoord, ChunkMesh)> {
    let mesher = ChunkMesher::new(atlas);
    chunk_coords(&grid.dims())
        .map(|coord| (coord, mesher.build(grid, coord.x, coord.z)))
        .collect()
}

/// FIFO of chunks awaiting a rebuild
///
/// A chunk already waiting is not queued twice. Each call to
/// [`ChunkBuildQueue::build_slice`] meshes at most `budget` chunks against the
/// grid as it is at that moment, so edits made between slices are picked up.
#[derive(Debug, Default)]
pub struct ChunkBuildQueue {
    pending: VecDeque<ChunkCoord>,
    queued: HashSet<ChunkCoord>,
}

impl ChunkBuildQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk, returning false if it was already waiting
    pub fn push(&mut self, coord: ChunkCoord) -> bool {
        if self.queued.insert(coord) {
            self.pending.push_back(coord);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.queued.contains(&coord)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.queued.clear();
    }

    /// Mesh up to `budget` queued chunks, oldest first
    pub fn build_slice(
        &mut self,
        grid: &VoxelGrid,
        atlas: &impl UvLookup,
        budget: usize,
    ) -> Vec<(ChunkCoord, ChunkMesh)> {
        let mesher = ChunkMesher::new(atlas);
        let take = budget.min(self.pending.len());
        let mut built = Vec::with_capacity(take);

        for coord in self.pending.drain(..take) {
            self.queued.remove(&coord);
            built.push((coord, mesher.build(grid, coord.x, coord.z)));
        }

        log::trace!("Built {} chunks, {} still queued", built.len(), self.pending.len());
        built
    }
}

impl Extend<ChunkCoord> for ChunkBuildQueue {
    fn extend<T: IntoIterator<Item = ChunkCoord>>(&mut self, iter: T) {
        for coord in iter {
            self.push(coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldDims;
    use blockvale_blocks::{BlockType, GridAtlas};

    fn test_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new(WorldDims::new(40, 20, 8));
        for z in 0..20 {
            for x in 0..40 {
                grid.set_block(x, 0, z, BlockType::Stone);
            }
        }
        grid.set_block(35, 1, 18, BlockType::Water);
        grid
    }

    #[test]
    fn test_queue_dedups() {
        let mut queue = ChunkBuildQueue::new();
        assert!(queue.push(ChunkCoord::new(0, 0)));
        assert!(!queue.push(ChunkCoord::new(0, 0)));
        queue.extend([ChunkCoord::new(1, 0), ChunkCoord::new(0, 0)]);
        assert_eq!(queue.len(), 2);
        assert!(queue.contains(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn test_build_slice_respects_budget() {
        let grid = test_grid();
        let atlas = GridAtlas::default();
        let mut queue = ChunkBuildQueue::new();
        queue.extend(chunk_coords(&grid.dims()));
        assert_eq!(queue.len(), 6);

        let first = queue.build_slice(&grid, &atlas, 4);
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].0, ChunkCoord::new(0, 0));
        assert_eq!(queue.len(), 2);

        let rest = queue.build_slice(&grid, &atlas, 10);
        assert_eq!(rest.len(), 2);
        assert!(queue.is_empty());
        assert!(queue.build_slice(&grid, &atlas, 10).is_empty());
    }

    #[test]
    fn test_requeue_after_build() {
        let grid = test_grid();
        let atlas = GridAtlas::default();
        let mut queue = ChunkBuildQueue::new();
        queue.push(ChunkCoord::new(2, 1));
        queue.build_slice(&grid, &atlas, 1);
        assert!(queue.push(ChunkCoord::new(2, 1)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = test_grid();
        let atlas = GridAtlas::default();
        let parallel = mesh_world(&grid, &atlas);
        let sequential = mesh_world_sequential(&grid, &atlas);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 6);

        let liquid_chunks: Vec<ChunkCoord> = parallel
            .iter()
            .filter(|(_, mesh)| mesh.liquid.is_some())
            .map(|(coord, _)| *coord)
            .collect();
        assert_eq!(liquid_chunks, vec![ChunkCoord::new(2, 1)]);
    }
}
