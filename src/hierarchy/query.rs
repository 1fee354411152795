//! Reward scale queries over a materialized hierarchy.

use hexscale_types::cell::CellId;

use super::DensityHierarchy;
use super::cell::Cell;
use crate::compute::index::GeoIndex;
use crate::error::{HexScaleError, Result};

impl<I: GeoIndex> DensityHierarchy<I> {
    /// Reward scale for a resident at `(lat, lng)`, in `(0, 1]`.
    ///
    /// Multiplies `clipped / unclipped` of every ancestor of the base cell,
    /// from `res_max - 1` up to and including `res_min`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexscale::DensityHierarchy;
    ///
    /// let mut hierarchy = DensityHierarchy::default();
    /// hierarchy.add_resident(37.7749, -122.4194, "lonely")?;
    /// hierarchy.materialize()?;
    ///
    /// assert_eq!(hierarchy.reward_scale(37.7749, -122.4194)?, 1.0);
    /// # Ok::<(), hexscale::HexScaleError>(())
    /// ```
    pub fn reward_scale(&self, lat: f64, lng: f64) -> Result<f64> {
        let cell = self.base_cell(lat, lng)?;
        self.reward_scale_for_cell(cell)
    }

    /// Reward scale starting from an ingested base cell.
    pub fn reward_scale_for_cell(&self, cell: CellId) -> Result<f64> {
        self.ensure_materialized()?;

        let mut scale = 1.0;
        for parent in self.ancestors(cell)? {
            scale *= parent
                .clip_ratio()
                .ok_or(HexScaleError::DegenerateDensity {
                    cell: parent.id,
                    resolution: parent.resolution,
                })?;
        }

        Ok(scale)
    }

    /// Copies of the base cell at `(lat, lng)` and all of its ancestors,
    /// finest first.
    pub fn lineage(&self, lat: f64, lng: f64) -> Result<Vec<Cell>> {
        self.ensure_materialized()?;
        let base = self.base_cell(lat, lng)?;

        let mut cells = Vec::with_capacity(self.levels.len());
        if let Some(cell) = self.levels[self.config.res_max as usize].get(&base) {
            cells.push(cell.clone());
        }
        cells.extend(self.ancestors(base)?.into_iter().cloned());
        Ok(cells)
    }

    /// Ingested base cell for `(lat, lng)`.
    fn base_cell(&self, lat: f64, lng: f64) -> Result<CellId> {
        let res_max = self.config.res_max;
        let cell = self.index.locate(lat, lng, res_max)?;
        if !self.levels[res_max as usize].contains_key(&cell) {
            return Err(HexScaleError::UnknownLocation { lat, lng, cell });
        }
        Ok(cell)
    }

    /// Ancestors of `cell` from `res_max - 1` down to `res_min`.
    fn ancestors(&self, cell: CellId) -> Result<Vec<&Cell>> {
        let res_min = self.config.res_min;
        let mut resolution = self.index.resolution_of(cell)?;
        if resolution != self.config.res_max {
            return Err(HexScaleError::InvalidResolution(format!(
                "Cell {} is at resolution {}, expected base resolution {}",
                cell, resolution, self.config.res_max
            )));
        }

        if !self.levels[resolution as usize].contains_key(&cell) {
            return Err(HexScaleError::IllegalCellAccess { cell, resolution });
        }

        let mut current = cell;
        let mut chain = Vec::with_capacity((resolution - res_min) as usize);
        while resolution > res_min {
            let parent_resolution = resolution - 1;
            let parent_id = self.index.parent(current, parent_resolution)?;
            let parent = self.levels[parent_resolution as usize]
                .get(&parent_id)
                .ok_or(HexScaleError::IllegalCellAccess {
                    cell: parent_id,
                    resolution: parent_resolution,
                })?;
            chain.push(parent);
            current = parent_id;
            resolution = parent_resolution;
        }

        Ok(chain)
    }

    fn ensure_materialized(&self) -> Result<()> {
        if self.materialized {
            Ok(())
        } else {
            Err(HexScaleError::NotMaterialized)
        }
    }
}
