use crate::world::chunk::{ChunkCoord, chunk_coords, chunks_affected_by};
use crate::world::generation::WorldGenerator;
use crate::world::grid::{VoxelGrid, WorldDims};
use crate::world::stats::GenerationReport;
use crate::world::worldgen_config::WorldGenConfig;
use blockvale_blocks::BlockType;
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// A generated world plus the edit bookkeeping of a play session
///
/// The session is the single writer of the grid. Edits go through
/// [`World::set_block`], which reports the chunks whose meshes went stale
/// and queues them in a dirty set for the driver to rebuild.
pub struct World {
    seed: i32,
    config: WorldGenConfig,
    grid: VoxelGrid,
    report: GenerationReport,
    dirty: BTreeSet<ChunkCoord>,
}

impl World {
    /// Generate the default world for a seed
    pub fn new(seed: i32) -> Self {
        Self::from_config(seed, WorldGenConfig::default())
    }

    /// Generate a world from a configuration
    ///
    /// Every chunk starts dirty since nothing has been meshed yet.
    pub fn from_config(seed: i32, config: WorldGenConfig) -> Self {
        let generator = WorldGenerator::from_config(seed, config.clone());
        let (grid, report) = generator.generate_with_report();
        let dirty = chunk_coords(&grid.dims()).collect();
        Self {
            seed,
            config,
            grid,
            report,
            dirty,
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    pub fn dims(&self) -> WorldDims {
        self.grid.dims()
    }

    /// Read-only view of the grid for meshing
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.grid.get_block(x, y, z)
    }

    /// Apply a single-block edit
    ///
    /// Returns the chunks that must be remeshed: the chunk holding the block
    /// plus any neighbour across a chunk border the block touches. Edits
    /// outside the world or that leave the block unchanged return nothing.
    pub fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block: BlockType,
    ) -> SmallVec<[ChunkCoord; 4]> {
        if !self.grid.in_bounds(x, y, z) || self.grid.get_block(x, y, z) == block {
            return SmallVec::new();
        }

        self.grid.set_block(x, y, z, block);
        let affected = chunks_affected_by(x, z, &self.grid.dims());
        self.dirty.extend(affected.iter().copied());
        log::trace!(
            "Set ({}, {}, {}) to {}, {} chunks stale",
            x,
            y,
            z,
            block,
            affected.len()
        );
        affected
    }

    pub fn has_dirty_chunks(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drain the stale chunks in coordinate order
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    /// Regenerate from the stored seed and config, discarding all edits
    pub fn regenerate(&mut self) {
        *self = Self::from_config(self.seed, self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::worldgen_config::WorldParams;

    fn small_world() -> World {
        let config = WorldGenConfig {
            world: WorldParams {
                width: 48,
                depth: 32,
                ..WorldParams::default()
            },
            ..WorldGenConfig::default()
        };
        World::from_config(12345, config)
    }

    #[test]
    fn test_new_world_all_dirty() {
        let mut world = small_world();
        let dirty = world.take_dirty_chunks();
        assert_eq!(dirty.len(), 3 * 2);
        assert!(!world.has_dirty_chunks());
    }

    #[test]
    fn test_set_block_marks_chunk() {
        let mut world = small_world();
        world.take_dirty_chunks();

        let affected = world.set_block(20, 60, 20, BlockType::Glass);
        assert_eq!(affected.as_slice(), &[ChunkCoord::new(1, 1)]);
        assert_eq!(world.get_block(20, 60, 20), BlockType::Glass);
        assert_eq!(world.take_dirty_chunks(), vec![ChunkCoord::new(1, 1)]);
    }

    #[test]
    fn test_border_edit_marks_neighbour() {
        let mut world = small_world();
        world.take_dirty_chunks();

        let affected = world.set_block(15, 60, 3, BlockType::Planks);
        assert_eq!(
            affected.as_slice(),
            &[ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]
        );
        assert_eq!(
            world.take_dirty_chunks(),
            vec![ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]
        );
    }

    #[test]
    fn test_noop_edits_mark_nothing() {
        let mut world = small_world();
        world.take_dirty_chunks();

        assert!(world.set_block(-1, 10, 10, BlockType::Stone).is_empty());
        assert!(world.set_block(10, 80, 10, BlockType::Stone).is_empty());
        let existing = world.get_block(10, 0, 10);
        assert!(world.set_block(10, 0, 10, existing).is_empty());
        assert!(!world.has_dirty_chunks());
    }

    #[test]
    fn test_regenerate_discards_edits() {
        let mut world = small_world();
        let original = world.get_block(5, 0, 5);
        world.set_block(5, 0, 5, BlockType::Air);
        world.regenerate();
        assert_eq!(world.get_block(5, 0, 5), original);
        assert_eq!(world.seed(), 12345);
    }
}
