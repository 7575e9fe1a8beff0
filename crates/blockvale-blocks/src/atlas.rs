//! Texture atlas lookup
//!
//! Meshing never owns texture data; it only asks a [`UvLookup`] for the
//! rectangle of a tile. [`GridAtlas`] covers the common case of equally sized
//! tiles laid out row-major in a single image.

use crate::blocks::TextureId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rectangle of one atlas tile in texture space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Maps a texture index to its UV rectangle
pub trait UvLookup {
    fn uv_for(&self, texture_index: u16) -> UvRect;
}

impl<T: UvLookup + ?Sized> UvLookup for &T {
    fn uv_for(&self, texture_index: u16) -> UvRect {
        (**self).uv_for(texture_index)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AtlasError {
    #[error("atlas must have at least one tile per row and one row")]
    EmptyGrid,
    #[error("padding {padding} leaves no room inside a {tile_size} wide tile")]
    PaddingTooLarge { padding: f32, tile_size: f32 },
}

/// Row-major grid of equally sized tiles
///
/// Tile 0 sits in the top-left corner of the image; V grows upward, so the
/// first row maps to the top of texture space. Deserializing runs the same
/// checks as [`GridAtlas::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridAtlasLayout")]
pub struct GridAtlas {
    tiles_per_row: u16,
    rows: u16,
    /// Inward inset applied on every edge to avoid sampling a neighbour tile
    padding: f32,
}

/// Unchecked serialized form of [`GridAtlas`]
#[derive(Deserialize)]
struct GridAtlasLayout {
    tiles_per_row: u16,
    rows: u16,
    padding: f32,
}

impl TryFrom<GridAtlasLayout> for GridAtlas {
    type Error = AtlasError;

    fn try_from(layout: GridAtlasLayout) -> Result<Self, Self::Error> {
        Self::new(layout.tiles_per_row, layout.rows, layout.padding)
    }
}

impl GridAtlas {
    /// Default inset in texture-space units
    pub const DEFAULT_PADDING: f32 = 0.001;

    pub fn new(tiles_per_row: u16, rows: u16, padding: f32) -> Result<Self, AtlasError> {
        if tiles_per_row == 0 || rows == 0 {
            return Err(AtlasError::EmptyGrid);
        }
        let tile_size = 1.0 / tiles_per_row.max(rows) as f32;
        if !(0.0..tile_size / 2.0).contains(&padding) {
            return Err(AtlasError::PaddingTooLarge { padding, tile_size });
        }
        Ok(Self {
            tiles_per_row,
            rows,
            padding,
        })
    }

    /// Smallest square-ish grid with `tiles_per_row` columns that holds every block tile
    pub fn for_blocks(tiles_per_row: u16, padding: f32) -> Result<Self, AtlasError> {
        if tiles_per_row == 0 {
            return Err(AtlasError::EmptyGrid);
        }
        let rows = TextureId::COUNT.div_ceil(tiles_per_row);
        Self::new(tiles_per_row, rows, padding)
    }

    pub fn tiles_per_row(&self) -> u16 {
        self.tiles_per_row
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }
}

impl Default for GridAtlas {
    fn default() -> Self {
        Self {
            tiles_per_row: 8,
            rows: TextureId::COUNT.div_ceil(8),
            padding: Self::DEFAULT_PADDING,
        }
    }
}

impl UvLookup for GridAtlas {
    fn uv_for(&self, texture_index: u16) -> UvRect {
        let col = (texture_index % self.tiles_per_row) as f32;
        let row = (texture_index / self.tiles_per_row) as f32;
        let tile_w = 1.0 / self.tiles_per_row as f32;
        let tile_h = 1.0 / self.rows as f32;

        UvRect {
            u0: col * tile_w + self.padding,
            v0: 1.0 - (row + 1.0) * tile_h + self.padding,
            u1: (col + 1.0) * tile_w - self.padding,
            v1: 1.0 - row * tile_h - self.padding,
        }
    }
}
