//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `blockvale.ron` file (if exists)
//! 3. Environment variables prefixed with `BLOCKVALE_`
//!
//! Command-line flags are applied on top by `main`.
//!
//! Example environment variable: `BLOCKVALE_ATLAS__PADDING=0.002`

use anyhow::{Context, Result};
use blockvale_core::GridAtlas;
use blockvale_core::world::{ConfigError, WorldGenConfig};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// World seed
    pub seed: i32,

    /// Name of the built-in worldgen preset used when no file is given
    pub preset: String,

    /// Optional RON file holding a full `WorldGenConfig`
    #[serde(default)]
    pub worldgen: Option<PathBuf>,

    #[serde(default)]
    pub atlas: AtlasConfig,

    #[serde(default)]
    pub meshing: MeshingConfig,

    #[serde(default)]
    pub map: MapConfig,
}

/// Texture atlas layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Tiles per atlas row; the row count follows from the block textures
    pub tiles_per_row: u16,
    /// Inward UV padding per tile edge
    pub padding: f32,
}

/// Whole-world meshing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshingConfig {
    /// Mesh chunks across the rayon thread pool
    pub parallel: bool,
}

/// Top-down map preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Pixels per world column along each axis
    pub scale: u32,
    /// Darken low columns and brighten high ones
    pub shade_height: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            preset: "default".to_string(),
            worldgen: None,
            atlas: AtlasConfig::default(),
            meshing: MeshingConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            tiles_per_row: 8,
            padding: GridAtlas::DEFAULT_PADDING,
        }
    }
}

impl Default for MeshingConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            shade_height: true,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AppConfig {
    /// Load configuration from `blockvale.ron` in the working directory
    /// and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("blockvale")
    }

    /// Load configuration with the file layer read from `file_stem`
    /// (extension optional)
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("seed", 12345_i64)?
            .set_default("preset", "default")?
            .set_default("atlas.tiles_per_row", 8_i64)?
            .set_default("atlas.padding", GridAtlas::DEFAULT_PADDING as f64)?
            .set_default("meshing.parallel", true)?
            .set_default("map.scale", 4_i64)?
            .set_default("map.shade_height", true)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BLOCKVALE_SEED, BLOCKVALE_ATLAS__PADDING, etc.)
            .add_source(Environment::with_prefix("BLOCKVALE").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Resolve the world generation parameters
    ///
    /// A worldgen file that exists but does not parse or validate is
    /// reported and replaced by the named preset. A file that cannot be
    /// read is an error.
    pub fn worldgen_config(&self) -> Result<WorldGenConfig> {
        let preset = WorldGenConfig::preset(&self.preset)
            .with_context(|| format!("Unknown worldgen preset '{}'", self.preset))?;

        let Some(path) = &self.worldgen else {
            return Ok(preset);
        };

        match WorldGenConfig::from_ron_file(path) {
            Ok(config) => {
                log::info!("Loaded worldgen config '{}' from {:?}", config.name, path);
                Ok(config)
            }
            Err(err @ ConfigError::Io { .. }) => Err(err).context("Failed to read worldgen config"),
            Err(err) => {
                log::warn!(
                    "Ignoring worldgen config {:?} ({}), using preset '{}'",
                    path,
                    err,
                    self.preset
                );
                Ok(preset)
            }
        }
    }

    /// Build the texture atlas described by `atlas`
    pub fn grid_atlas(&self) -> Result<GridAtlas> {
        GridAtlas::for_blocks(self.atlas.tiles_per_row, self.atlas.padding)
            .context("Invalid atlas configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.seed, 12345);
        assert_eq!(config.preset, "default");
        assert!(config.worldgen.is_none());
        assert_eq!(config.atlas.tiles_per_row, 8);
        assert!(config.meshing.parallel);
        assert_eq!(config.map.scale, 4);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stem = dir.path().join("blockvale");
        let config = AppConfig::load_from(stem.to_str().expect("utf-8 path"))
            .expect("Failed to load config");
        assert_eq!(config.preset, "default");
        assert_eq!(config.atlas.tiles_per_row, 8);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("blockvale.ron"),
            "(preset: \"flat\", atlas: (tiles_per_row: 6, padding: 0.002))",
        )
        .expect("write config");

        let stem = dir.path().join("blockvale");
        let config = AppConfig::load_from(stem.to_str().expect("utf-8 path"))
            .expect("Failed to load config");
        assert_eq!(config.preset, "flat");
        assert_eq!(config.atlas.tiles_per_row, 6);
        assert!((config.atlas.padding - 0.002).abs() < 1e-6);
        assert!(config.meshing.parallel);
    }

    #[test]
    fn test_worldgen_from_preset() {
        let config = AppConfig {
            preset: "archipelago".to_string(),
            ..AppConfig::default()
        };
        let worldgen = config.worldgen_config().expect("preset exists");
        assert_eq!(worldgen, WorldGenConfig::preset_archipelago());
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let config = AppConfig {
            preset: "moon".to_string(),
            ..AppConfig::default()
        };
        assert!(config.worldgen_config().is_err());
    }

    #[test]
    fn test_worldgen_file_and_fallback() {
        let dir = tempfile::tempdir().expect("temp dir");

        let good = dir.path().join("flat.ron");
        WorldGenConfig::preset_flat()
            .save_ron_file(&good)
            .expect("save config");
        let config = AppConfig {
            worldgen: Some(good),
            ..AppConfig::default()
        };
        assert_eq!(
            config.worldgen_config().expect("file loads"),
            WorldGenConfig::preset_flat()
        );

        let broken = dir.path().join("broken.ron");
        fs::write(&broken, "(name: ").expect("write config");
        let config = AppConfig {
            worldgen: Some(broken),
            ..AppConfig::default()
        };
        assert_eq!(
            config.worldgen_config().expect("falls back"),
            WorldGenConfig::default()
        );

        let config = AppConfig {
            worldgen: Some(dir.path().join("missing.ron")),
            ..AppConfig::default()
        };
        assert!(config.worldgen_config().is_err());
    }

    #[test]
    fn test_grid_atlas_rejects_bad_padding() {
        let mut config = AppConfig::default();
        assert!(config.grid_atlas().is_ok());
        config.atlas.padding = 0.5;
        assert!(config.grid_atlas().is_err());
    }
}
