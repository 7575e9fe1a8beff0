//! Post-terrain feature placement
//!
//! Vegetation and shoreline decoration run after terrain, caves and ores,
//! each driven by its own stage RNG.

use crate::world::biome::{Biome, BiomeDefinition};
use crate::world::generation::ColumnMap;
use crate::world::grid::VoxelGrid;
use crate::world::rng_trait::WorldRng;
use crate::world::stats::GenerationReport;
use crate::world::worldgen_config::WorldGenConfig;
use blockvale_blocks::BlockType;

/// Tallest cactus
const MAX_CACTUS_HEIGHT: i32 = 3;

/// What a vegetation roll selected for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VegetationKind {
    Tree,
    Cactus,
    Pumpkin,
}

/// Map a roll in `[0, 1)` onto the running-total density bands of a biome
///
/// Trees take `[0, tree)`, cacti the next `cactus` wide band and pumpkins
/// the band after that, so the three never compete for the same roll.
pub fn select_vegetation(def: &BiomeDefinition, density_scale: f32, roll: f32) -> Option<VegetationKind> {
    let tree_band = def.tree_density * density_scale;
    let cactus_band = tree_band + def.cactus_density * density_scale;
    let pumpkin_band = cactus_band + def.pumpkin_density * density_scale;

    if roll < tree_band {
        Some(VegetationKind::Tree)
    } else if roll < cactus_band {
        Some(VegetationKind::Cactus)
    } else if roll < pumpkin_band {
        Some(VegetationKind::Pumpkin)
    } else {
        None
    }
}

/// Whether `count` blocks directly above `(x, y, z)` are air and inside the world
fn column_clear(grid: &VoxelGrid, x: i32, y: i32, z: i32, count: i32) -> bool {
    y + count < grid.height() && (1..=count).all(|dy| grid.get_block(x, y + dy, z).is_air())
}

/// Stage 5: trees, cacti and pumpkins
pub fn place_vegetation(
    grid: &mut VoxelGrid,
    columns: &ColumnMap,
    config: &WorldGenConfig,
    rng: &mut impl WorldRng,
    report: &mut GenerationReport,
) {
    let margin = config.vegetation.border_margin.max(0);
    let scale = config.vegetation.density_scale;
    let sea_level = config.world.sea_level;

    for z in margin..grid.depth() - margin {
        for x in margin..grid.width() - margin {
            // One roll per column keeps the stream aligned regardless of outcome
            let roll = rng.gen_f32();

            let (Some(h), Some(biome)) = (columns.height(x, z), columns.biome(x, z)) else {
                continue;
            };
            if h < sea_level {
                continue;
            }
            let surface = grid.get_block(x, h, z);
            if !matches!(
                surface,
                BlockType::Grass | BlockType::SnowGrass | BlockType::Sand
            ) {
                continue;
            }

            let def = biome.definition();
            match select_vegetation(def, scale, roll) {
                Some(VegetationKind::Tree) => {
                    let (min, max) = def.trunk_height;
                    let trunk = rng.gen_range_i32(min, max);
                    if surface != BlockType::Sand && column_clear(grid, x, h, z, trunk + 2) {
                        grow_tree(grid, x, h, z, trunk, def);
                        report.trees_placed += 1;
                    }
                }
                Some(VegetationKind::Cactus) => {
                    let height = rng.gen_range_i32(1, MAX_CACTUS_HEIGHT);
                    if surface == BlockType::Sand && column_clear(grid, x, h, z, height + 1) {
                        for dy in 1..=height {
                            grid.set_block(x, h + dy, z, BlockType::Cactus);
                        }
                        report.cacti_placed += 1;
                    }
                }
                Some(VegetationKind::Pumpkin) => {
                    if surface == BlockType::Grass && column_clear(grid, x, h, z, 1) {
                        grid.set_block(x, h + 1, z, BlockType::Pumpkin);
                        report.pumpkins_placed += 1;
                    }
                }
                None => {}
            }
        }
    }
}

/// Trunk from `surface + 1` up `trunk` blocks, capped by a rounded canopy
///
/// The canopy is four stacked square rings centred on the trunk top: two at
/// full radius below it, one a step narrower at the top log, and a radius-1
/// cap above. Ring corners are skipped and the trunk column is left to the
/// log below the cap. Leaves only fill air.
pub fn grow_tree(grid: &mut VoxelGrid, x: i32, surface: i32, z: i32, trunk: i32, def: &BiomeDefinition) {
    for dy in 1..=trunk {
        grid.set_block(x, surface + dy, z, def.log_block);
    }

    let top = surface + trunk;
    let full = def.canopy_radius.max(1);
    for dy in -2..=1 {
        let radius = match dy {
            -2 | -1 => full,
            0 => (full - 1).max(1),
            _ => 1,
        };
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() == radius && dz.abs() == radius {
                    continue;
                }
                if dx == 0 && dz == 0 && dy <= 0 {
                    continue;
                }
                let (lx, ly, lz) = (x + dx, top + dy, z + dz);
                if grid.get_block(lx, ly, lz).is_air() {
                    grid.set_block(lx, ly, lz, BlockType::Leaves);
                }
            }
        }
    }
}

/// Stage 6: clay along shorelines and ice on snowy water
pub fn decorate_shoreline(
    grid: &mut VoxelGrid,
    columns: &ColumnMap,
    config: &WorldGenConfig,
    rng: &mut impl WorldRng,
    report: &mut GenerationReport,
) {
    let shore = &config.shoreline;
    let sea_level = config.world.sea_level;

    for (x, z, h, biome) in columns.columns() {
        if (h == sea_level || h == sea_level - 1)
            && touches_water(grid, x, sea_level, z)
            && rng.check_probability(shore.clay_chance)
        {
            let depth = if rng.check_probability(shore.deep_clay_chance) {
                2
            } else {
                1
            };
            if place_clay(grid, x, h, z, depth) {
                report.clay_deposits += 1;
            }
        }

        if shore.freeze_snowy_water
            && biome == Biome::Snowy
            && grid.get_block(x, sea_level, z) == BlockType::Water
        {
            grid.set_block(x, sea_level, z, BlockType::Ice);
            report.ice_placed += 1;
        }
    }
}

/// Whether any horizontal neighbour at layer `y` holds water
fn touches_water(grid: &VoxelGrid, x: i32, y: i32, z: i32) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .iter()
        .any(|(dx, dz)| grid.get_block(x + dx, y, z + dz) == BlockType::Water)
}

/// Replace the top `depth` soil blocks of a column with clay
///
/// Columns carrying a plant or tree are left alone.
fn place_clay(grid: &mut VoxelGrid, x: i32, surface: i32, z: i32, depth: i32) -> bool {
    let above = grid.get_block(x, surface + 1, z);
    if !(above.is_air() || above.is_liquid()) {
        return false;
    }

    let mut placed = false;
    for y in (surface - depth + 1..=surface).rev() {
        let block = grid.get_block(x, y, z);
        if matches!(
            block,
            BlockType::Grass | BlockType::SnowGrass | BlockType::Dirt | BlockType::Sand
        ) {
            grid.set_block(x, y, z, BlockType::Clay);
            placed = true;
        }
    }
    placed
}
