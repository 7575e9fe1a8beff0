//! Biome classification and per-biome terrain characteristics

use blockvale_blocks::BlockType;
use serde::{Deserialize, Serialize};

/// Climate class of one world column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    Plains,
    Forest,
    Desert,
    Snowy,
    Mountains,
    Swamp,
}

/// Defines the characteristics of a biome
#[derive(Debug, Clone)]
pub struct BiomeDefinition {
    pub name: &'static str,

    // Column fill
    pub surface_block: BlockType,
    pub subsurface_block: BlockType,
    /// Sandstone band directly under the subsurface layer
    pub has_sandstone: bool,

    // Terrain shape
    pub base_height: f64,
    /// Scale applied to the height fbm sample
    pub height_amplitude: f64,

    // Vegetation (densities are per-column probabilities)
    pub tree_density: f32,
    pub cactus_density: f32,
    pub pumpkin_density: f32,
    pub trunk_height: (i32, i32), // inclusive range
    pub canopy_radius: i32,
    pub log_block: BlockType,

    /// Map preview color (RGBA)
    pub map_color: [u8; 4],
}

const PLAINS: BiomeDefinition = BiomeDefinition {
    name: "Plains",
    surface_block: BlockType::Grass,
    subsurface_block: BlockType::Dirt,
    has_sandstone: false,
    base_height: 33.0,
    height_amplitude: 5.0,
    tree_density: 0.01,
    cactus_density: 0.0,
    pumpkin_density: 0.004,
    trunk_height: (4, 5),
    canopy_radius: 2,
    log_block: BlockType::OakLog,
    map_color: [124, 189, 82, 255],
};

const FOREST: BiomeDefinition = BiomeDefinition {
    name: "Forest",
    surface_block: BlockType::Grass,
    subsurface_block: BlockType::Dirt,
    has_sandstone: false,
    base_height: 34.0,
    height_amplitude: 6.0,
    tree_density: 0.08,
    cactus_density: 0.0,
    pumpkin_density: 0.0,
    trunk_height: (4, 6),
    canopy_radius: 2,
    log_block: BlockType::OakLog,
    map_color: [34, 120, 44, 255],
};

const DESERT: BiomeDefinition = BiomeDefinition {
    name: "Desert",
    surface_block: BlockType::Sand,
    subsurface_block: BlockType::Sand,
    has_sandstone: true,
    base_height: 32.0,
    height_amplitude: 3.0,
    tree_density: 0.0,
    cactus_density: 0.012,
    pumpkin_density: 0.0,
    trunk_height: (4, 5),
    canopy_radius: 2,
    log_block: BlockType::OakLog,
    map_color: [230, 210, 140, 255],
};

const SNOWY: BiomeDefinition = BiomeDefinition {
    name: "Snowy",
    surface_block: BlockType::SnowGrass,
    subsurface_block: BlockType::Dirt,
    has_sandstone: false,
    base_height: 33.0,
    height_amplitude: 6.0,
    tree_density: 0.03,
    cactus_density: 0.0,
    pumpkin_density: 0.0,
    trunk_height: (5, 7),
    canopy_radius: 1,
    log_block: BlockType::BirchLog,
    map_color: [235, 245, 250, 255],
};

const MOUNTAINS: BiomeDefinition = BiomeDefinition {
    name: "Mountains",
    surface_block: BlockType::Grass,
    subsurface_block: BlockType::Dirt,
    has_sandstone: false,
    base_height: 42.0,
    height_amplitude: 20.0,
    tree_density: 0.015,
    cactus_density: 0.0,
    pumpkin_density: 0.0,
    trunk_height: (4, 5),
    canopy_radius: 2,
    log_block: BlockType::OakLog,
    map_color: [130, 130, 130, 255],
};

const SWAMP: BiomeDefinition = BiomeDefinition {
    name: "Swamp",
    surface_block: BlockType::Grass,
    subsurface_block: BlockType::Dirt,
    has_sandstone: false,
    base_height: 30.0,
    height_amplitude: 2.0,
    tree_density: 0.03,
    cactus_density: 0.0,
    pumpkin_density: 0.0,
    trunk_height: (3, 5),
    canopy_radius: 2,
    log_block: BlockType::OakLog,
    map_color: [76, 96, 60, 255],
};

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Plains,
        Biome::Forest,
        Biome::Desert,
        Biome::Snowy,
        Biome::Mountains,
        Biome::Swamp,
    ];

    pub fn definition(self) -> &'static BiomeDefinition {
        match self {
            Biome::Plains => &PLAINS,
            Biome::Forest => &FOREST,
            Biome::Desert => &DESERT,
            Biome::Snowy => &SNOWY,
            Biome::Mountains => &MOUNTAINS,
            Biome::Swamp => &SWAMP,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Threshold rules mapping normalized climate samples to a biome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeThresholds {
    pub desert_min_temperature: f64,
    pub desert_max_moisture: f64,
    pub snowy_max_temperature: f64,
    pub mountains_min_elevation: f64,
    pub forest_min_moisture: f64,
    pub forest_min_temperature: f64,
    pub swamp_min_moisture: f64,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            desert_min_temperature: 0.58,
            desert_max_moisture: 0.45,
            snowy_max_temperature: 0.38,
            mountains_min_elevation: 0.58,
            forest_min_moisture: 0.55,
            forest_min_temperature: 0.5,
            swamp_min_moisture: 0.56,
        }
    }
}

impl BiomeThresholds {
    /// Classify a column from temperature, moisture and elevation in `[0, 1]`
    ///
    /// Rules are checked in a fixed order and the first match wins.
    pub fn classify(&self, temperature: f64, moisture: f64, elevation: f64) -> Biome {
        if temperature > self.desert_min_temperature && moisture < self.desert_max_moisture {
            Biome::Desert
        } else if temperature < self.snowy_max_temperature {
            Biome::Snowy
        } else if elevation > self.mountains_min_elevation {
            Biome::Mountains
        } else if moisture > self.forest_min_moisture && temperature > self.forest_min_temperature
        {
            Biome::Forest
        } else if moisture > self.swamp_min_moisture {
            Biome::Swamp
        } else {
            Biome::Plains
        }
    }
}
