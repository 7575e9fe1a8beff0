//! Block definitions and registry

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Texture tile indices into the block atlas
pub struct TextureId;

impl TextureId {
    // Terrain
    pub const GRASS_TOP: u16 = 0;
    pub const GRASS_SIDE: u16 = 1;
    pub const DIRT: u16 = 2;
    pub const STONE: u16 = 3;
    pub const SAND: u16 = 4;
    pub const WATER: u16 = 5;
    pub const BEDROCK: u16 = 6;
    pub const GRAVEL: u16 = 7;
    pub const CLAY: u16 = 8;

    // Wood and foliage
    pub const OAK_LOG_TOP: u16 = 9;
    pub const OAK_LOG_SIDE: u16 = 10;
    pub const BIRCH_LOG_TOP: u16 = 11;
    pub const BIRCH_LOG_SIDE: u16 = 12;
    pub const LEAVES: u16 = 13;

    // Ores
    pub const COAL_ORE: u16 = 14;
    pub const IRON_ORE: u16 = 15;
    pub const GOLD_ORE: u16 = 16;
    pub const DIAMOND_ORE: u16 = 17;

    // Cold and dry biomes
    pub const SNOW: u16 = 18;
    pub const SNOW_GRASS_SIDE: u16 = 19;
    pub const ICE: u16 = 20;
    pub const SANDSTONE_TOP: u16 = 21;
    pub const SANDSTONE_SIDE: u16 = 22;
    pub const CACTUS_TOP: u16 = 23;
    pub const CACTUS_SIDE: u16 = 24;
    pub const PUMPKIN_TOP: u16 = 25;
    pub const PUMPKIN_SIDE: u16 = 26;

    // Building blocks
    pub const PLANKS: u16 = 27;
    pub const COBBLESTONE: u16 = 28;
    pub const GLASS: u16 = 29;

    /// Number of distinct tiles the atlas must provide
    pub const COUNT: u16 = 30;
}

bitflags! {
    /// Classification bits consumed by face culling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BlockFlags: u8 {
        /// Rendered in the translucent liquid stream
        const LIQUID = 1 << 0;
        /// Neighbouring faces stay visible through this block
        const TRANSPARENT = 1 << 1;
    }
}

/// Which texture of a block's triple a face uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSlot {
    Top,
    Bottom,
    Side,
}

/// Per-face texture assignment (top, bottom, side)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceTextures {
    pub top: u16,
    pub bottom: u16,
    pub side: u16,
}

impl FaceTextures {
    /// Same tile on every face
    pub const fn uniform(tile: u16) -> Self {
        Self {
            top: tile,
            bottom: tile,
            side: tile,
        }
    }

    pub const fn new(top: u16, bottom: u16, side: u16) -> Self {
        Self { top, bottom, side }
    }

    pub fn for_slot(&self, slot: FaceSlot) -> u16 {
        match slot {
            FaceSlot::Top => self.top,
            FaceSlot::Bottom => self.bottom,
            FaceSlot::Side => self.side,
        }
    }
}

/// Definition of a block's static properties
#[derive(Clone, Debug)]
pub struct BlockDef {
    pub name: &'static str,
    pub flags: BlockFlags,
    pub textures: FaceTextures,
    /// Preview color (RGBA) for top-down maps
    pub color: [u8; 4],
}

impl BlockDef {
    const fn opaque(name: &'static str, textures: FaceTextures, color: [u8; 4]) -> Self {
        Self {
            name,
            flags: BlockFlags::empty(),
            textures,
            color,
        }
    }
}

/// Every kind of block a world can hold
///
/// The discriminant doubles as the index into the definition table, so
/// variants must stay in the same order as `BLOCK_DEFS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
    OakLog,
    BirchLog,
    Leaves,
    Bedrock,
    CoalOre,
    IronOre,
    GoldOre,
    DiamondOre,
    Gravel,
    SnowGrass,
    Sandstone,
    Snow,
    Ice,
    Cactus,
    Planks,
    Cobblestone,
    Glass,
    Pumpkin,
    Clay,
}

static BLOCK_DEFS: [BlockDef; BlockType::COUNT] = [
    BlockDef {
        name: "air",
        flags: BlockFlags::TRANSPARENT,
        textures: FaceTextures::uniform(0),
        color: [0, 0, 0, 0],
    },
    BlockDef::opaque(
        "grass",
        FaceTextures::new(TextureId::GRASS_TOP, TextureId::DIRT, TextureId::GRASS_SIDE),
        [95, 159, 53, 255],
    ),
    BlockDef::opaque("dirt", FaceTextures::uniform(TextureId::DIRT), [134, 96, 67, 255]),
    BlockDef::opaque("stone", FaceTextures::uniform(TextureId::STONE), [125, 125, 125, 255]),
    BlockDef::opaque("sand", FaceTextures::uniform(TextureId::SAND), [219, 207, 163, 255]),
    BlockDef {
        name: "water",
        flags: BlockFlags::LIQUID.union(BlockFlags::TRANSPARENT),
        textures: FaceTextures::uniform(TextureId::WATER),
        color: [52, 95, 218, 200],
    },
    BlockDef::opaque(
        "oak_log",
        FaceTextures::new(
            TextureId::OAK_LOG_TOP,
            TextureId::OAK_LOG_TOP,
            TextureId::OAK_LOG_SIDE,
        ),
        [102, 81, 51, 255],
    ),
    BlockDef::opaque(
        "birch_log",
        FaceTextures::new(
            TextureId::BIRCH_LOG_TOP,
            TextureId::BIRCH_LOG_TOP,
            TextureId::BIRCH_LOG_SIDE,
        ),
        [216, 215, 210, 255],
    ),
    BlockDef::opaque("leaves", FaceTextures::uniform(TextureId::LEAVES), [58, 122, 40, 255]),
    BlockDef::opaque("bedrock", FaceTextures::uniform(TextureId::BEDROCK), [45, 45, 45, 255]),
    BlockDef::opaque("coal_ore", FaceTextures::uniform(TextureId::COAL_ORE), [70, 70, 70, 255]),
    BlockDef::opaque("iron_ore", FaceTextures::uniform(TextureId::IRON_ORE), [175, 142, 119, 255]),
    BlockDef::opaque("gold_ore", FaceTextures::uniform(TextureId::GOLD_ORE), [240, 210, 70, 255]),
    BlockDef::opaque(
        "diamond_ore",
        FaceTextures::uniform(TextureId::DIAMOND_ORE),
        [92, 219, 213, 255],
    ),
    BlockDef::opaque("gravel", FaceTextures::uniform(TextureId::GRAVEL), [136, 126, 126, 255]),
    BlockDef::opaque(
        "snow_grass",
        FaceTextures::new(TextureId::SNOW, TextureId::DIRT, TextureId::SNOW_GRASS_SIDE),
        [240, 251, 251, 255],
    ),
    BlockDef::opaque(
        "sandstone",
        FaceTextures::new(
            TextureId::SANDSTONE_TOP,
            TextureId::SAND,
            TextureId::SANDSTONE_SIDE,
        ),
        [216, 203, 155, 255],
    ),
    BlockDef::opaque("snow", FaceTextures::uniform(TextureId::SNOW), [250, 250, 255, 255]),
    BlockDef::opaque("ice", FaceTextures::uniform(TextureId::ICE), [160, 190, 255, 255]),
    BlockDef::opaque(
        "cactus",
        FaceTextures::new(
            TextureId::CACTUS_TOP,
            TextureId::CACTUS_TOP,
            TextureId::CACTUS_SIDE,
        ),
        [82, 131, 38, 255],
    ),
    BlockDef::opaque("planks", FaceTextures::uniform(TextureId::PLANKS), [162, 130, 78, 255]),
    BlockDef::opaque(
        "cobblestone",
        FaceTextures::uniform(TextureId::COBBLESTONE),
        [110, 110, 110, 255],
    ),
    BlockDef {
        name: "glass",
        flags: BlockFlags::TRANSPARENT,
        textures: FaceTextures::uniform(TextureId::GLASS),
        color: [200, 230, 240, 120],
    },
    BlockDef::opaque(
        "pumpkin",
        FaceTextures::new(
            TextureId::PUMPKIN_TOP,
            TextureId::PUMPKIN_TOP,
            TextureId::PUMPKIN_SIDE,
        ),
        [206, 120, 24, 255],
    ),
    BlockDef::opaque("clay", FaceTextures::uniform(TextureId::CLAY), [160, 166, 179, 255]),
];

impl BlockType {
    pub const COUNT: usize = 25;

    /// All block kinds in discriminant order
    pub const ALL: [BlockType; BlockType::COUNT] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Water,
        BlockType::OakLog,
        BlockType::BirchLog,
        BlockType::Leaves,
        BlockType::Bedrock,
        BlockType::CoalOre,
        BlockType::IronOre,
        BlockType::GoldOre,
        BlockType::DiamondOre,
        BlockType::Gravel,
        BlockType::SnowGrass,
        BlockType::Sandstone,
        BlockType::Snow,
        BlockType::Ice,
        BlockType::Cactus,
        BlockType::Planks,
        BlockType::Cobblestone,
        BlockType::Glass,
        BlockType::Pumpkin,
        BlockType::Clay,
    ];

    /// Static definition for this block
    pub fn def(self) -> &'static BlockDef {
        &BLOCK_DEFS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    pub fn is_liquid(self) -> bool {
        self.def().flags.contains(BlockFlags::LIQUID)
    }

    /// Whether faces behind this block remain visible
    pub fn is_transparent(self) -> bool {
        self.def().flags.contains(BlockFlags::TRANSPARENT)
    }

    pub fn is_ore(self) -> bool {
        matches!(
            self,
            BlockType::CoalOre | BlockType::IronOre | BlockType::GoldOre | BlockType::DiamondOre
        )
    }

    /// Atlas tile for the given face slot
    pub fn texture(self, slot: FaceSlot) -> u16 {
        self.def().textures.for_slot(slot)
    }

    pub fn color(self) -> [u8; 4] {
        self.def().color
    }

    /// Look up a block by its registry name (e.g. `"oak_log"`)
    pub fn from_name(name: &str) -> Option<BlockType> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_discriminants() {
        for (i, block) in BlockType::ALL.iter().enumerate() {
            assert_eq!(*block as usize, i, "{} out of order", block);
        }
    }

    #[test]
    fn test_names_are_unique() {
        for block in BlockType::ALL {
            assert_eq!(BlockType::from_name(block.name()), Some(block));
        }
        assert_eq!(BlockType::from_name("lava"), None);
    }

    #[test]
    fn test_transparent_set() {
        let transparent: Vec<BlockType> = BlockType::ALL
            .into_iter()
            .filter(|b| b.is_transparent())
            .collect();
        assert_eq!(
            transparent,
            vec![BlockType::Air, BlockType::Water, BlockType::Glass]
        );
    }

    #[test]
    fn test_only_water_is_liquid() {
        for block in BlockType::ALL {
            assert_eq!(block.is_liquid(), block == BlockType::Water, "{}", block);
        }
    }

    #[test]
    fn test_grass_face_textures() {
        let grass = BlockType::Grass;
        assert_eq!(grass.texture(FaceSlot::Top), TextureId::GRASS_TOP);
        assert_eq!(grass.texture(FaceSlot::Side), TextureId::GRASS_SIDE);
        assert_eq!(grass.texture(FaceSlot::Bottom), TextureId::DIRT);
    }

    #[test]
    fn test_textures_within_atlas() {
        for block in BlockType::ALL {
            let t = block.def().textures;
            for tile in [t.top, t.bottom, t.side] {
                assert!(tile < TextureId::COUNT, "{} uses tile {}", block, tile);
            }
        }
    }

    #[test]
    fn test_default_is_air() {
        assert_eq!(BlockType::default(), BlockType::Air);
        assert!(BlockType::default().is_air());
    }
}
