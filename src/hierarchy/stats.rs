use serde::{Deserialize, Serialize};

use super::DensityHierarchy;
use crate::compute::index::GeoIndex;

/// Per-resolution summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub resolution: u8,
    pub cells: usize,
    pub clipped_cells: usize,
    pub unclipped_total: u64,
    pub clipped_total: u64,
}

/// Hierarchy statistics, levels ordered finest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    pub residents: usize,
    pub generation: u64,
    pub materialized: bool,
    pub levels: Vec<LevelStats>,
}

impl HierarchyStats {
    pub fn total_cells(&self) -> usize {
        self.levels.iter().map(|level| level.cells).sum()
    }

    pub fn level(&self, resolution: u8) -> Option<&LevelStats> {
        self.levels.iter().find(|level| level.resolution == resolution)
    }
}

impl<I: GeoIndex> DensityHierarchy<I> {
    pub fn stats(&self) -> HierarchyStats {
        let levels = (self.config.res_min..=self.config.res_max)
            .rev()
            .map(|resolution| {
                let mut stats = LevelStats {
                    resolution,
                    ..Default::default()
                };
                for cell in self.levels[resolution as usize].values() {
                    stats.cells += 1;
                    stats.unclipped_total += cell.unclipped_density;
                    stats.clipped_total += cell.clipped_density;
                    if cell.is_clipped() {
                        stats.clipped_cells += 1;
                    }
                }
                stats
            })
            .collect();

        HierarchyStats {
            residents: self.resident_count,
            generation: self.generation,
            materialized: self.materialized,
            levels,
        }
    }
}
