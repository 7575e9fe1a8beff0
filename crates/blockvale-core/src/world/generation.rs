use crate::noise::NoiseField;
use crate::world::biome::Biome;
use crate::world::features::{decorate_shoreline, place_vegetation};
use crate::world::grid::{VoxelGrid, WorldDims};
use crate::world::rng_trait::{WorldRng, stage_rng, voxel_rng};
use crate::world::stats::GenerationReport;
use crate::world::worldgen_config::{CaveLayer, FbmLayer, WorldGenConfig};
use blockvale_blocks::BlockType;

/// Layers of subsurface soil between stone and the surface block
pub const SUBSURFACE_DEPTH: i32 = 4;

/// Layers of sandstone under desert sand
const SANDSTONE_DEPTH: i32 = 3;

/// Normalized climate samples for one column, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    pub temperature: f64,
    pub moisture: f64,
    pub elevation: f64,
}

/// Per-column biome and surface height, computed before any block is placed
///
/// Generation-time scratch data; it is dropped once the grid is populated.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    width: i32,
    depth: i32,
    heights: Vec<i32>,
    biomes: Vec<Biome>,
}

impl ColumnMap {
    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x >= self.width || z >= self.depth {
            return None;
        }
        Some(x as usize + z as usize * self.width as usize)
    }

    /// Surface height of a column, `None` outside the map
    pub fn height(&self, x: i32, z: i32) -> Option<i32> {
        self.index(x, z).map(|i| self.heights[i])
    }

    pub fn biome(&self, x: i32, z: i32) -> Option<Biome> {
        self.index(x, z).map(|i| self.biomes[i])
    }

    /// Iterate `(x, z, height, biome)` in row order
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32, i32, Biome)> + '_ {
        let width = self.width;
        self.heights
            .iter()
            .zip(&self.biomes)
            .enumerate()
            .map(move |(i, (&h, &b))| (i as i32 % width, i as i32 / width, h, b))
    }
}

/// World generator built from seeded gradient noise
///
/// Can be created with default parameters via `new(seed)` or with a full
/// configuration via `from_config(seed, config)`. Each purpose gets its own
/// noise field seeded at a fixed offset from the base seed.
pub struct WorldGenerator {
    pub seed: i32,

    config: WorldGenConfig,

    // Biome selection - low frequency
    elevation_noise: NoiseField,
    temperature_noise: NoiseField,
    moisture_noise: NoiseField,

    // Terrain detail
    height_noise: NoiseField,

    // Underground
    cave_noise: NoiseField,
    ore_noise: NoiseField,
}

impl WorldGenerator {
    /// Create a new WorldGenerator with default configuration
    pub fn new(seed: i32) -> Self {
        Self::from_config(seed, WorldGenConfig::default())
    }

    /// Create a WorldGenerator from a configuration
    pub fn from_config(seed: i32, config: WorldGenConfig) -> Self {
        let offsets = &config.seeds;
        let field = |offset: i32| NoiseField::new(seed.wrapping_add(offset));

        Self {
            seed,
            elevation_noise: field(offsets.elevation),
            temperature_noise: field(offsets.temperature),
            moisture_noise: field(offsets.moisture),
            height_noise: field(offsets.height),
            cave_noise: field(offsets.caves),
            ore_noise: field(offsets.ore_noise),
            config,
        }
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    pub fn dims(&self) -> WorldDims {
        self.config.dims()
    }

    pub fn sea_level(&self) -> i32 {
        self.config.world.sea_level
    }

    /// Generate the full world
    pub fn generate(&self) -> VoxelGrid {
        self.generate_with_report().0
    }

    /// Generate the full world and report what each stage placed
    pub fn generate_with_report(&self) -> (VoxelGrid, GenerationReport) {
        let mut grid = VoxelGrid::new(self.dims());
        let mut report = GenerationReport::default();

        let columns = self.classify_columns(&mut report);
        log::debug!(
            "Classified {} columns into {} biomes",
            columns.heights.len(),
            report.biome_columns.len()
        );

        self.fill_columns(&mut grid, &columns);

        if self.config.caves.enabled {
            self.carve_caves(&mut grid, &columns, &mut report);
            log::debug!("Carved {} cave voxels", report.caves_carved);
        }

        if self.config.ores.enabled {
            self.seed_ores(&mut grid, &mut report);
            log::debug!(
                "Placed {} ore and gravel voxels",
                report.ores_placed.values().sum::<usize>()
            );
        }

        if self.config.vegetation.enabled {
            let mut rng = stage_rng(self.seed, self.config.seeds.vegetation_rng);
            place_vegetation(&mut grid, &columns, &self.config, &mut rng, &mut report);
            log::debug!("Placed {} vegetation features", report.vegetation_total());
        }

        if self.config.shoreline.enabled {
            let mut rng = stage_rng(self.seed, self.config.seeds.shoreline_rng);
            decorate_shoreline(&mut grid, &columns, &self.config, &mut rng, &mut report);
            log::debug!(
                "Placed {} clay deposits and {} ice",
                report.clay_deposits,
                report.ice_placed
            );
        }

        log::info!(
            "Generated {}x{}x{} world for seed {} ({} trees, {} cave voxels)",
            grid.width(),
            grid.height(),
            grid.depth(),
            self.seed,
            report.trees_placed,
            report.caves_carved
        );

        (grid, report)
    }

    // ------------------------------------------------------------------------
    // Stage 1: column classification
    // ------------------------------------------------------------------------

    /// Sample the three climate fields at a column
    pub fn sample_climate(&self, x: i32, z: i32) -> Climate {
        let climate = &self.config.climate;
        let sample = |noise: &NoiseField, layer: &FbmLayer| {
            let (fx, fz) = (x as f64 * layer.frequency, z as f64 * layer.frequency);
            (noise.fbm2d_default(fx, fz, layer.octaves) + 1.0) / 2.0
        };

        Climate {
            temperature: sample(&self.temperature_noise, &climate.temperature),
            moisture: sample(&self.moisture_noise, &climate.moisture),
            elevation: sample(&self.elevation_noise, &climate.elevation),
        }
    }

    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        let c = self.sample_climate(x, z);
        self.config
            .biomes
            .classify(c.temperature, c.moisture, c.elevation)
    }

    /// Surface height of a column for a given biome
    pub fn terrain_height(&self, x: i32, z: i32, biome: Biome) -> i32 {
        let terrain = &self.config.terrain;
        let def = biome.definition();
        let f = terrain.height_noise.frequency;
        let detail = self.height_noise.fbm2d_default(
            x as f64 * f,
            z as f64 * f,
            terrain.height_noise.octaves,
        );
        let raw = def.base_height + detail * def.height_amplitude * terrain.amplitude_scale;

        let world_height = self.config.world.height;
        let ceiling = (world_height - terrain.ceiling_margin)
            .min(world_height - 1)
            .max(1);
        let floor = terrain.min_height.clamp(1, ceiling);
        (raw.floor() as i32).clamp(floor, ceiling)
    }

    /// Classify every column and compute its surface height
    pub fn classify_columns(&self, report: &mut GenerationReport) -> ColumnMap {
        let dims = self.dims();
        let area = (dims.width.max(0) as usize) * (dims.depth.max(0) as usize);
        let mut heights = Vec::with_capacity(area);
        let mut biomes = Vec::with_capacity(area);

        for z in 0..dims.depth {
            for x in 0..dims.width {
                let biome = self.biome_at(x, z);
                heights.push(self.terrain_height(x, z, biome));
                biomes.push(biome);
                report.record_biome(biome);
            }
        }

        ColumnMap {
            width: dims.width,
            depth: dims.depth,
            heights,
            biomes,
        }
    }

    // ------------------------------------------------------------------------
    // Stage 2: column fill
    // ------------------------------------------------------------------------

    fn fill_columns(&self, grid: &mut VoxelGrid, columns: &ColumnMap) {
        let sea_level = self.sea_level();

        for (x, z, h, biome) in columns.columns() {
            let def = biome.definition();

            grid.set_block(x, 0, z, BlockType::Bedrock);
            for y in 1..h {
                let block = if y < h - SUBSURFACE_DEPTH {
                    BlockType::Stone
                } else {
                    def.subsurface_block
                };
                grid.set_block(x, y, z, block);
            }
            grid.set_block(x, h, z, def.surface_block);

            for y in (h + 1)..=sea_level {
                grid.set_block(x, y, z, BlockType::Water);
            }

            if def.has_sandstone {
                let top = h - SUBSURFACE_DEPTH;
                for y in (top - SANDSTONE_DEPTH).max(1)..top {
                    if grid.get_block(x, y, z) == BlockType::Stone {
                        grid.set_block(x, y, z, BlockType::Sandstone);
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Stage 3: caves
    // ------------------------------------------------------------------------

    /// The two cave noise samples at a voxel
    pub fn cave_samples(&self, x: i32, y: i32, z: i32) -> (f64, f64) {
        let caves = &self.config.caves;
        let sample = |layer: &CaveLayer| {
            let f = layer.frequency;
            self.cave_noise.noise3d(
                x as f64 * f + layer.offset,
                y as f64 * f + layer.offset,
                z as f64 * f + layer.offset,
            )
        };
        (sample(&caves.primary), sample(&caves.secondary))
    }

    /// Whether both cave samples exceed their thresholds
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        let caves = &self.config.caves;
        let (a, b) = self.cave_samples(x, y, z);
        a > caves.primary.threshold && b > caves.secondary.threshold
    }

    /// Layers of a column the cave stage may carve: from the configured
    /// minimum up to just below the surface block
    pub fn cave_range(&self, surface_height: i32) -> std::ops::Range<i32> {
        self.config.caves.min_y.max(1)..surface_height
    }

    fn carve_caves(&self, grid: &mut VoxelGrid, columns: &ColumnMap, report: &mut GenerationReport) {
        for (x, z, h, _) in columns.columns() {
            for y in self.cave_range(h) {
                if grid.get_block(x, y, z).is_air() {
                    continue;
                }
                if self.is_cave(x, y, z) {
                    grid.set_block(x, y, z, BlockType::Air);
                    report.caves_carved += 1;
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Stage 4: ores
    // ------------------------------------------------------------------------

    pub fn ore_sample(&self, x: i32, y: i32, z: i32) -> f64 {
        let f = self.config.ores.noise_frequency;
        self.ore_noise
            .noise3d(x as f64 * f, y as f64 * f, z as f64 * f)
    }

    /// Replace stone with ore or gravel
    ///
    /// Policies are tried in listed order with one draw each; the first that
    /// places wins, so a voxel admitted by several policies goes to the
    /// earliest one. Draws come from a generator keyed by the voxel's index,
    /// so carving elsewhere never moves an ore.
    fn seed_ores(&self, grid: &mut VoxelGrid, report: &mut GenerationReport) {
        let dims = self.dims();
        let policies = &self.config.ores.policies;
        let offset = self.config.seeds.ore_rng;

        for y in 0..dims.height {
            for z in 0..dims.depth {
                for x in 0..dims.width {
                    if grid.get_block(x, y, z) != BlockType::Stone {
                        continue;
                    }
                    let noise = self.ore_sample(x, y, z);
                    let index = ((y * dims.depth + z) * dims.width + x) as u64;
                    let mut rng = None;
                    for policy in policies {
                        if !policy.admits(y, noise) {
                            continue;
                        }
                        let rng = rng.get_or_insert_with(|| voxel_rng(self.seed, offset, index));
                        if rng.check_probability(policy.probability) {
                            grid.set_block(x, y, z, policy.block);
                            report.record_ore(policy.block);
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Generate the default world for a seed
pub fn generate(seed: i32) -> VoxelGrid {
    WorldGenerator::new(seed).generate()
}
