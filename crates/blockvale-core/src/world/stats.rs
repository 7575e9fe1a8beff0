//! Generation statistics
//!
//! Collected while the pipeline runs so callers can inspect what a seed
//! produced without rescanning the grid.

use crate::world::biome::Biome;
use blockvale_blocks::BlockType;
use std::collections::BTreeMap;

/// Counts gathered by [`WorldGenerator::generate_with_report`](crate::world::WorldGenerator::generate_with_report)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Columns classified into each biome
    pub biome_columns: BTreeMap<Biome, usize>,
    /// Voxels turned to air by cave carving
    pub caves_carved: usize,
    /// Ore and gravel placements by block
    pub ores_placed: BTreeMap<BlockType, usize>,
    pub trees_placed: usize,
    pub cacti_placed: usize,
    pub pumpkins_placed: usize,
    /// Columns that received a clay deposit
    pub clay_deposits: usize,
    /// Water voxels frozen to ice
    pub ice_placed: usize,
}

impl GenerationReport {
    pub fn record_biome(&mut self, biome: Biome) {
        *self.biome_columns.entry(biome).or_default() += 1;
    }

    pub fn record_ore(&mut self, block: BlockType) {
        *self.ores_placed.entry(block).or_default() += 1;
    }

    pub fn biome_count(&self, biome: Biome) -> usize {
        self.biome_columns.get(&biome).copied().unwrap_or(0)
    }

    pub fn ore_count(&self, block: BlockType) -> usize {
        self.ores_placed.get(&block).copied().unwrap_or(0)
    }

    /// Biomes that never appeared
    pub fn missing_biomes(&self) -> Vec<Biome> {
        Biome::ALL
            .into_iter()
            .filter(|b| self.biome_count(*b) == 0)
            .collect()
    }

    pub fn vegetation_total(&self) -> usize {
        self.trees_placed + self.cacti_placed + self.pumpkins_placed
    }
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "biomes:")?;
        for (biome, count) in &self.biome_columns {
            writeln!(f, "  {:<10} {:>6} columns", biome, count)?;
        }
        writeln!(f, "caves carved: {}", self.caves_carved)?;
        writeln!(f, "ores:")?;
        for (block, count) in &self.ores_placed {
            writeln!(f, "  {:<12} {:>6}", block, count)?;
        }
        writeln!(
            f,
            "vegetation: {} trees, {} cacti, {} pumpkins",
            self.trees_placed, self.cacti_placed, self.pumpkins_placed
        )?;
        write!(
            f,
            "shoreline: {} clay deposits, {} ice",
            self.clay_deposits, self.ice_placed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_default_is_empty() {
        let report = GenerationReport::default();
        assert_eq!(report.missing_biomes().len(), Biome::ALL.len());
        assert_eq!(report.vegetation_total(), 0);
        assert_eq!(report.ore_count(BlockType::CoalOre), 0);
    }

    #[test]
    fn test_record_counts() {
        let mut report = GenerationReport::default();
        report.record_biome(Biome::Desert);
        report.record_biome(Biome::Desert);
        report.record_ore(BlockType::GoldOre);
        assert_eq!(report.biome_count(Biome::Desert), 2);
        assert_eq!(report.ore_count(BlockType::GoldOre), 1);
        assert!(!report.missing_biomes().contains(&Biome::Desert));
    }

    #[test]
    fn test_display_mentions_biomes() {
        let mut report = GenerationReport::default();
        report.record_biome(Biome::Swamp);
        report.trees_placed = 3;
        let text = report.to_string();
        assert!(text.contains("Swamp"));
        assert!(text.contains("3 trees"));
    }
}
