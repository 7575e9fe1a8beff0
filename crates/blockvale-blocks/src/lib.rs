//! Block data for Blockvale
//!
//! This crate provides the foundational data types shared by generation and meshing:
//! - Block kinds and their static attributes (BlockType, BlockDef, BlockFlags)
//! - Per-face texture assignment (TextureId, FaceTextures, FaceSlot)
//! - Texture atlas lookup contract (UvLookup, UvRect, GridAtlas)

mod atlas;
mod blocks;

pub use atlas::{AtlasError, GridAtlas, UvLookup, UvRect};
pub use blocks::{BlockDef, BlockFlags, BlockType, FaceSlot, FaceTextures, TextureId};
