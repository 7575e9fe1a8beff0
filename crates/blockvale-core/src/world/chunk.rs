//! Chunk addressing
//!
//! Chunks are not stored separately; a chunk is a `CHUNK_SIZE × CHUNK_SIZE`
//! column window over the grid used as the unit of meshing.

use crate::world::grid::WorldDims;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Horizontal edge length of a chunk in blocks
pub const CHUNK_SIZE: i32 = 16;

/// Horizontal chunk position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk holding world column `(x, z)`
    pub fn containing(x: i32, z: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            z: z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World position of the chunk's minimum corner column
    pub fn origin(&self) -> (i32, i32) {
        (self.x.saturating_mul(CHUNK_SIZE), self.z.saturating_mul(CHUNK_SIZE))
    }

    /// Whether any column of this chunk lies inside the world
    pub fn intersects(&self, dims: &WorldDims) -> bool {
        let (ox, oz) = self.origin();
        ox < dims.width
            && oz < dims.depth
            && ox.saturating_add(CHUNK_SIZE) > 0
            && oz.saturating_add(CHUNK_SIZE) > 0
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Number of chunks along x and z needed to cover the world
pub fn chunk_extent(dims: &WorldDims) -> (i32, i32) {
    let across = |len: i32| if len <= 0 { 0 } else { (len + CHUNK_SIZE - 1) / CHUNK_SIZE };
    (across(dims.width), across(dims.depth))
}

/// Every chunk that intersects the world, x-major within each z row
pub fn chunk_coords(dims: &WorldDims) -> impl Iterator<Item = ChunkCoord> {
    let (cx, cz) = chunk_extent(dims);
    (0..cz).flat_map(move |z| (0..cx).map(move |x| ChunkCoord::new(x, z)))
}

/// Chunks whose geometry depends on the block at column `(x, z)`
///
/// Always the containing chunk, plus the neighbour across each chunk border
/// the column touches, since that neighbour culls faces against this block.
/// Chunks outside the world are left out; a column outside the world yields
/// nothing.
pub fn chunks_affected_by(x: i32, z: i32, dims: &WorldDims) -> SmallVec<[ChunkCoord; 4]> {
    let mut affected = SmallVec::new();
    if !dims.contains_column(x, z) {
        return affected;
    }

    let home = ChunkCoord::containing(x, z);
    affected.push(home);

    let local_x = x.rem_euclid(CHUNK_SIZE);
    let local_z = z.rem_euclid(CHUNK_SIZE);
    let candidates = [
        (local_x == 0, ChunkCoord::new(home.x - 1, home.z)),
        (local_x == CHUNK_SIZE - 1, ChunkCoord::new(home.x + 1, home.z)),
        (local_z == 0, ChunkCoord::new(home.x, home.z - 1)),
        (local_z == CHUNK_SIZE - 1, ChunkCoord::new(home.x, home.z + 1)),
    ];
    for (on_border, neighbour) in candidates {
        if on_border && neighbour.intersects(dims) {
            affected.push(neighbour);
        }
    }
    affected
}
