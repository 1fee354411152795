//! Density state of a single grid cell.

use hexscale_types::cell::CellId;
use hexscale_types::profile::ResolutionProfile;
use serde::{Deserialize, Serialize};

/// One cell of the hierarchy at one resolution.
///
/// Cells only leave the hierarchy as copies; the hierarchy is the sole owner
/// of the live values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub resolution: u8,
    /// Residents assigned directly to this cell (finest resolution only)
    pub raw_density: u64,
    /// Raw density at the finest resolution, sum of the children's clipped
    /// densities above it
    pub unclipped_density: u64,
    pub clipped_density: u64,
    pub density_limit: u64,
    /// Neighbors at or above the resolution's density target
    pub occupied_count: u64,
    /// Residents mapping into this cell, in ingestion order of their base cells
    pub residents: Vec<String>,
    /// Materialization pass that produced the current densities, 0 if none
    pub generation: u64,
}

impl Cell {
    pub fn new(id: CellId, resolution: u8, profile: &ResolutionProfile) -> Self {
        Self {
            id,
            resolution,
            raw_density: 0,
            unclipped_density: 0,
            clipped_density: 0,
            density_limit: profile.max,
            occupied_count: 0,
            residents: Vec::new(),
            generation: 0,
        }
    }

    /// Record `occupied` neighbors and clip the unclipped density against the
    /// resulting limit.
    pub(crate) fn apply_occupancy(&mut self, occupied: u64, profile: &ResolutionProfile) {
        self.occupied_count = occupied;
        self.density_limit = profile.density_limit(occupied);
        self.clipped_density = self.unclipped_density.min(self.density_limit);
    }

    /// Whether the limit cut this cell's density.
    #[inline]
    pub fn is_clipped(&self) -> bool {
        self.clipped_density < self.unclipped_density
    }

    /// `clipped / unclipped`, or `None` when nothing was counted here.
    pub fn clip_ratio(&self) -> Option<f64> {
        if self.unclipped_density == 0 {
            None
        } else {
            Some(self.clipped_density as f64 / self.unclipped_density as f64)
        }
    }
}

/// Which density a neighbor is compared with when counting occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Raw,
    Unclipped,
}

impl Comparison {
    #[inline]
    pub(crate) fn of(self, cell: &Cell) -> u64 {
        match self {
            Comparison::Raw => cell.raw_density,
            Comparison::Unclipped => cell.unclipped_density,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_starts_at_max_limit() {
        let profile = ResolutionProfile::new(2, 5, 20);
        let cell = Cell::new(CellId::new(1), 7, &profile);
        assert_eq!(cell.density_limit, 20);
        assert_eq!(cell.clipped_density, 0);
        assert_eq!(cell.generation, 0);
        assert!(cell.clip_ratio().is_none());
    }

    #[test]
    fn test_apply_occupancy_clips() {
        let profile = ResolutionProfile::new(2, 1, 4);
        let mut cell = Cell::new(CellId::new(1), 8, &profile);
        cell.unclipped_density = 6;

        cell.apply_occupancy(3, &profile);
        assert_eq!(cell.density_limit, 2);
        assert_eq!(cell.clipped_density, 2);
        assert!(cell.is_clipped());
        assert_eq!(cell.clip_ratio(), Some(2.0 / 6.0));
    }

    #[test]
    fn test_apply_occupancy_under_limit() {
        let profile = ResolutionProfile::new(1, 25, 100);
        let mut cell = Cell::new(CellId::new(1), 6, &profile);
        cell.unclipped_density = 10;

        cell.apply_occupancy(0, &profile);
        assert_eq!(cell.clipped_density, 10);
        assert!(!cell.is_clipped());
        assert_eq!(cell.clip_ratio(), Some(1.0));
    }

    #[test]
    fn test_comparison_selects_field() {
        let profile = ResolutionProfile::sentinel();
        let mut cell = Cell::new(CellId::new(1), 11, &profile);
        cell.raw_density = 3;
        cell.unclipped_density = 5;
        assert_eq!(Comparison::Raw.of(&cell), 3);
        assert_eq!(Comparison::Unclipped.of(&cell), 5);
    }
}
