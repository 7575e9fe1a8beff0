//! World generation configuration - serializable parameters for world generation
//!
//! This module provides data structures that capture all world generation parameters,
//! enabling:
//! - Serialization to RON format for presets
//! - Configuration-driven world generation
//! - Per-stage seed offsets so stages stay independent of each other
//!
//! The defaults reproduce the canonical 128×80×128 world with sea level 30.

use crate::world::biome::BiomeThresholds;
use crate::world::grid::{SEA_LEVEL, WORLD_DEPTH, WORLD_HEIGHT, WORLD_WIDTH, WorldDims};
use blockvale_blocks::BlockType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on grid size accepted by [`WorldGenConfig::validate`]
const MAX_VOXELS: usize = 1 << 28;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse world generation config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize world generation config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid world generation config: {0}")]
    Invalid(String),
}

/// Complete world generation configuration
///
/// All parameters needed to generate a world. Serializable to RON for presets.
/// The seed is NOT part of the config - same config + different seed = different world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldGenConfig {
    /// Display name for this configuration
    pub name: String,

    /// World volume and sea level
    pub world: WorldParams,

    /// Climate fields used for biome selection
    pub climate: ClimateParams,

    /// Biome classification thresholds
    pub biomes: BiomeThresholds,

    /// Terrain height generation
    pub terrain: TerrainParams,

    /// Cave carving
    pub caves: CaveParams,

    /// Ore and gravel seeding
    pub ores: OreParams,

    /// Trees, cacti and pumpkins
    pub vegetation: VegetationParams,

    /// Clay deposits and frozen water
    pub shoreline: ShorelineParams,

    /// Offsets added to the base seed for each noise field and stage RNG
    pub seeds: SeedOffsets,
}

/// World dimensions and water level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    pub width: i32,
    pub depth: i32,
    pub height: i32,
    /// Highest layer filled with water in open columns (default: 30)
    pub sea_level: i32,
}

/// Sampling parameters for one fbm field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FbmLayer {
    /// Multiplier applied to block coordinates before sampling
    pub frequency: f64,
    pub octaves: u32,
}

impl FbmLayer {
    pub const fn new(frequency: f64, octaves: u32) -> Self {
        Self { frequency, octaves }
    }
}

/// Large-scale climate fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateParams {
    pub temperature: FbmLayer,
    pub moisture: FbmLayer,
    pub elevation: FbmLayer,
}

/// Terrain height generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Fine height variation added on top of the biome base height
    pub height_noise: FbmLayer,
    /// Multiplier on every biome's height amplitude (default: 1.0)
    pub amplitude_scale: f64,
    /// Lowest allowed surface height (default: 4)
    pub min_height: i32,
    /// Blocks kept free between the highest surface and the world ceiling (default: 16)
    pub ceiling_margin: i32,
}

/// One of the two cave noise samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveLayer {
    pub frequency: f64,
    /// Added to every scaled coordinate to decorrelate from the other layer
    pub offset: f64,
    /// Sample must exceed this to vote for carving
    pub threshold: f64,
}

/// Cave carving parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveParams {
    pub enabled: bool,
    pub primary: CaveLayer,
    pub secondary: CaveLayer,
    /// Lowest carvable layer (default: 2, keeps bedrock and the layer above intact)
    pub min_y: i32,
}

/// Which side of the ore noise threshold triggers a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseBand {
    Above,
    Below,
}

/// Placement rule for one ore kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrePolicy {
    pub block: BlockType,
    /// Inclusive y range
    pub min_y: i32,
    pub max_y: i32,
    pub band: NoiseBand,
    pub noise_threshold: f64,
    /// Chance of placement once the noise and depth checks pass
    pub probability: f32,
}

impl OrePolicy {
    /// Whether depth and noise allow this policy at `y`
    pub fn admits(&self, y: i32, noise: f64) -> bool {
        if y < self.min_y || y > self.max_y {
            return false;
        }
        match self.band {
            NoiseBand::Above => noise > self.noise_threshold,
            NoiseBand::Below => noise < self.noise_threshold,
        }
    }
}

/// Ore seeding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OreParams {
    pub enabled: bool,
    pub noise_frequency: f64,
    /// Checked in order; the first policy that places wins
    pub policies: Vec<OrePolicy>,
}

/// Vegetation placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationParams {
    pub enabled: bool,
    /// Columns this close to the world edge never grow anything (default: 3)
    pub border_margin: i32,
    /// Multiplier on every biome density (default: 1.0)
    pub density_scale: f32,
}

/// Shoreline and climate decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShorelineParams {
    pub enabled: bool,
    /// Chance a qualifying shore column gets clay (default: 0.3)
    pub clay_chance: f32,
    /// Chance a clay deposit is two blocks deep instead of one (default: 0.5)
    pub deep_clay_chance: f32,
    /// Turn sea-level water in snowy columns into ice
    pub freeze_snowy_water: bool,
}

/// Seed offsets per purpose, added to the base seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedOffsets {
    pub elevation: i32,
    pub temperature: i32,
    pub moisture: i32,
    pub caves: i32,
    pub height: i32,
    pub ore_noise: i32,
    pub ore_rng: i64,
    pub vegetation_rng: i64,
    pub shoreline_rng: i64,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            world: WorldParams::default(),
            climate: ClimateParams::default(),
            biomes: BiomeThresholds::default(),
            terrain: TerrainParams::default(),
            caves: CaveParams::default(),
            ores: OreParams::default(),
            vegetation: VegetationParams::default(),
            shoreline: ShorelineParams::default(),
            seeds: SeedOffsets::default(),
        }
    }
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            depth: WORLD_DEPTH,
            height: WORLD_HEIGHT,
            sea_level: SEA_LEVEL,
        }
    }
}

impl Default for ClimateParams {
    fn default() -> Self {
        Self {
            temperature: FbmLayer::new(0.03, 2),
            moisture: FbmLayer::new(0.03, 2),
            elevation: FbmLayer::new(0.02, 3),
        }
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            height_noise: FbmLayer::new(0.05, 4),
            amplitude_scale: 1.0,
            min_height: 4,
            ceiling_margin: 16,
        }
    }
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            enabled: true,
            primary: CaveLayer {
                frequency: 0.06,
                offset: 0.0,
                threshold: 0.22,
            },
            secondary: CaveLayer {
                frequency: 0.11,
                offset: 100.0,
                threshold: 0.24,
            },
            min_y: 2,
        }
    }
}

impl Default for OreParams {
    fn default() -> Self {
        Self {
            enabled: true,
            noise_frequency: 0.15,
            policies: default_ore_policies(),
        }
    }
}

impl Default for VegetationParams {
    fn default() -> Self {
        Self {
            enabled: true,
            border_margin: 3,
            density_scale: 1.0,
        }
    }
}

impl Default for ShorelineParams {
    fn default() -> Self {
        Self {
            enabled: true,
            clay_chance: 0.3,
            deep_clay_chance: 0.5,
            freeze_snowy_water: true,
        }
    }
}

impl Default for SeedOffsets {
    fn default() -> Self {
        Self {
            elevation: 0,
            temperature: 1,
            moisture: 2,
            caves: 3,
            height: 4,
            ore_noise: 5,
            ore_rng: 100,
            vegetation_rng: 200,
            shoreline_rng: 300,
        }
    }
}

/// Coal, iron, gold, diamond, then gravel
fn default_ore_policies() -> Vec<OrePolicy> {
    vec![
        OrePolicy {
            block: BlockType::CoalOre,
            min_y: 5,
            max_y: 50,
            band: NoiseBand::Above,
            noise_threshold: 0.45,
            probability: 0.5,
        },
        OrePolicy {
            block: BlockType::IronOre,
            min_y: 1,
            max_y: 48,
            band: NoiseBand::Above,
            noise_threshold: 0.5,
            probability: 0.45,
        },
        OrePolicy {
            block: BlockType::GoldOre,
            min_y: 1,
            max_y: 24,
            band: NoiseBand::Above,
            noise_threshold: 0.55,
            probability: 0.4,
        },
        OrePolicy {
            block: BlockType::DiamondOre,
            min_y: 1,
            max_y: 14,
            band: NoiseBand::Above,
            noise_threshold: 0.6,
            probability: 0.35,
        },
        OrePolicy {
            block: BlockType::Gravel,
            min_y: 1,
            max_y: i32::MAX,
            band: NoiseBand::Below,
            noise_threshold: -0.5,
            probability: 0.5,
        },
    ]
}

// ============================================================================
// Loading, saving and validation
// ============================================================================

impl WorldGenConfig {
    pub fn dims(&self) -> WorldDims {
        WorldDims::new(self.world.width, self.world.depth, self.world.height)
    }

    /// Check that the config describes a world that can be generated
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.dims();
        match dims.volume() {
            None => {
                return Err(ConfigError::Invalid(format!(
                    "world dimensions {}x{}x{} must all be positive",
                    dims.width, dims.height, dims.depth
                )));
            }
            Some(v) if v > MAX_VOXELS => {
                return Err(ConfigError::Invalid(format!(
                    "world of {} voxels exceeds the limit of {}",
                    v, MAX_VOXELS
                )));
            }
            Some(_) => {}
        }

        if self.world.sea_level < 1 || self.world.sea_level >= self.world.height {
            return Err(ConfigError::Invalid(format!(
                "sea level {} must lie in [1, {})",
                self.world.sea_level, self.world.height
            )));
        }

        let layers = [
            ("temperature", &self.climate.temperature),
            ("moisture", &self.climate.moisture),
            ("elevation", &self.climate.elevation),
            ("height", &self.terrain.height_noise),
        ];
        for (name, layer) in layers {
            if layer.octaves == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} noise needs at least one octave",
                    name
                )));
            }
        }

        for policy in &self.ores.policies {
            if !(0.0..=1.0).contains(&policy.probability) {
                return Err(ConfigError::Invalid(format!(
                    "{} probability {} outside [0, 1]",
                    policy.block, policy.probability
                )));
            }
        }

        Ok(())
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(4);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn save_ron_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_ron_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// Preset helpers
// ============================================================================

impl WorldGenConfig {
    /// Create a preset with more caves
    pub fn preset_cave_heavy() -> Self {
        let defaults = CaveParams::default();
        Self {
            name: "Cave Heavy".to_string(),
            caves: CaveParams {
                primary: CaveLayer {
                    threshold: 0.1,
                    ..defaults.primary
                },
                secondary: CaveLayer {
                    threshold: 0.12,
                    ..defaults.secondary
                },
                ..defaults
            },
            ..Self::default()
        }
    }

    /// Create a preset with flat terrain (good for building)
    pub fn preset_flat() -> Self {
        Self {
            name: "Flat World".to_string(),
            terrain: TerrainParams {
                amplitude_scale: 0.1,
                ..TerrainParams::default()
            },
            vegetation: VegetationParams {
                density_scale: 0.25,
                ..VegetationParams::default()
            },
            ..Self::default()
        }
    }

    /// Create a preset with a raised sea level, leaving only hilltops dry
    pub fn preset_archipelago() -> Self {
        Self {
            name: "Archipelago".to_string(),
            world: WorldParams {
                sea_level: 36,
                ..WorldParams::default()
            },
            ..Self::default()
        }
    }

    /// Look up a preset by its short name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "cave_heavy" => Some(Self::preset_cave_heavy()),
            "flat" => Some(Self::preset_flat()),
            "archipelago" => Some(Self::preset_archipelago()),
            _ => None,
        }
    }
}
