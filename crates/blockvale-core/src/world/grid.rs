//! Dense voxel storage for a fixed-size world volume

use blockvale_blocks::BlockType;
use serde::{Deserialize, Serialize};

/// Default world width (x) in blocks
pub const WORLD_WIDTH: i32 = 128;
/// Default world depth (z) in blocks
pub const WORLD_DEPTH: i32 = 128;
/// Default world height (y) in blocks
pub const WORLD_HEIGHT: i32 = 80;
/// Default sea level; water fills open columns up to and including this layer
pub const SEA_LEVEL: i32 = 30;

/// Size of a world volume in blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldDims {
    pub width: i32,
    pub depth: i32,
    pub height: i32,
}

impl WorldDims {
    pub const fn new(width: i32, depth: i32, height: i32) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.depth
    }

    #[inline]
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.width && z >= 0 && z < self.depth
    }

    /// Total number of voxels, or `None` for empty or overflowing sizes
    pub fn volume(&self) -> Option<usize> {
        if self.width <= 0 || self.depth <= 0 || self.height <= 0 {
            return None;
        }
        (self.width as usize)
            .checked_mul(self.depth as usize)?
            .checked_mul(self.height as usize)
    }
}

impl Default for WorldDims {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_DEPTH, WORLD_HEIGHT)
    }
}

/// Flat block array covering `width × height × depth`
///
/// Reads outside the volume return [`BlockType::Air`] and writes outside it
/// are ignored, so callers never need to bounds-check neighbours themselves.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: WorldDims,
    blocks: Box<[BlockType]>,
}

impl VoxelGrid {
    /// Create an all-air grid
    ///
    /// Non-positive dimensions produce an empty grid where every read is air.
    pub fn new(dims: WorldDims) -> Self {
        let len = dims.volume().unwrap_or(0);
        Self {
            dims,
            blocks: vec![BlockType::Air; len].into_boxed_slice(),
        }
    }

    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    pub fn width(&self) -> i32 {
        self.dims.width
    }

    pub fn depth(&self) -> i32 {
        self.dims.depth
    }

    pub fn height(&self) -> i32 {
        self.dims.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.blocks.is_empty() || !self.dims.contains(x, y, z) {
            return None;
        }
        let (w, d) = (self.dims.width as usize, self.dims.depth as usize);
        Some(x as usize + z as usize * w + y as usize * w * d)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some()
    }

    /// Block at a position, air when out of bounds
    #[inline]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        match self.index(x, y, z) {
            Some(i) => self.blocks[i],
            None => BlockType::Air,
        }
    }

    /// Write a block; returns false (and does nothing) when out of bounds
    #[inline]
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.blocks[i] = block;
                true
            }
            None => false,
        }
    }

    /// Highest y in a column holding a solid (non-air, non-liquid) block
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        if !self.dims.contains_column(x, z) {
            return None;
        }
        (0..self.dims.height).rev().find(|&y| {
            let block = self.get_block(x, y, z);
            !block.is_air() && !block.is_liquid()
        })
    }

    /// Highest non-air block in a column, liquids included
    pub fn top_block(&self, x: i32, z: i32) -> Option<(i32, BlockType)> {
        if !self.dims.contains_column(x, z) {
            return None;
        }
        (0..self.dims.height)
            .rev()
            .map(|y| (y, self.get_block(x, y, z)))
            .find(|(_, block)| !block.is_air())
    }

    /// Number of voxels holding `block`
    pub fn count(&self, block: BlockType) -> usize {
        self.blocks.iter().filter(|&&b| b == block).count()
    }

    /// Occurrences of every block kind, indexed by discriminant
    pub fn histogram(&self) -> [usize; BlockType::COUNT] {
        let mut counts = [0usize; BlockType::COUNT];
        for &block in self.blocks.iter() {
            counts[block as usize] += 1;
        }
        counts
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("dims", &self.dims)
            .field("voxels", &self.blocks.len())
            .finish()
    }
}
