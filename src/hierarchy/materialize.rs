//! Level-by-level materialization of the hierarchy.
//!
//! Each pass walks from `res_max` down to `res_min`. For every level the
//! aggregate phase (create parents, sum children) completes before the clip
//! phase (count occupied neighbors, cap) starts. Both phases first compute
//! from an immutable view of the hierarchy and then apply the results, which
//! is what lets the `parallel` feature spread the per-cell work over rayon.

use std::time::Instant;

use hexscale_types::cell::CellId;
use hexscale_types::profile::ResolutionProfile;

use super::cell::{Cell, Comparison};
use super::{DensityHierarchy, Level, density_of};
use crate::compute::index::GeoIndex;
use crate::error::{HexScaleError, Result};

impl<I: GeoIndex> DensityHierarchy<I> {
    /// Compute every density field from the ingested residents.
    ///
    /// Rebuilds all levels coarser than `res_max` from scratch, so it can be
    /// called again after further ingestion.
    pub fn materialize(&mut self) -> Result<()> {
        let started = Instant::now();
        let res_min = self.config.res_min;
        let res_max = self.config.res_max;

        self.generation += 1;
        let generation = self.generation;

        let clipped = self.clip_base(generation)?;
        log::debug!(
            "res {}: {} base cells, {} clipped",
            res_max,
            self.levels[res_max as usize].len(),
            clipped
        );

        for resolution in ((res_min + 1)..=res_max).rev() {
            let created = self.aggregate_level(resolution, generation)?;
            let clipped = self.clip_level(resolution - 1, &created)?;
            log::debug!(
                "res {}: {} cells, {} clipped",
                resolution - 1,
                created.len(),
                clipped
            );
        }

        self.materialized = true;

        let total: usize = (res_min..=res_max)
            .map(|resolution| self.levels[resolution as usize].len())
            .sum();
        log::info!(
            "Materialized {} cells for {} residents (generation {}) in {:?}",
            total,
            self.resident_count,
            generation,
            started.elapsed()
        );

        Ok(())
    }

    /// Clip the finest level against its neighbors' raw densities.
    fn clip_base(&mut self, generation: u64) -> Result<usize> {
        let res_max = self.config.res_max;
        let level = &mut self.levels[res_max as usize];

        let mut ids: Vec<CellId> = Vec::with_capacity(level.len());
        for (id, cell) in level.iter_mut() {
            cell.unclipped_density = cell.raw_density;
            cell.generation = generation;
            ids.push(*id);
        }
        ids.sort_unstable();

        self.apply_occupancy(res_max, &ids, Comparison::Raw)
    }

    /// Aggregate phase: create the parents of every cell at `resolution` and
    /// return the ids created in this pass.
    fn aggregate_level(&mut self, resolution: u8, generation: u64) -> Result<Vec<CellId>> {
        let parent_resolution = resolution - 1;
        let profile = self.config.profile(parent_resolution);
        let index = &self.index;

        let (coarser, finer) = self.levels.split_at_mut(resolution as usize);
        let parents = &mut coarser[parent_resolution as usize];
        let children = &finer[0];

        let mut child_ids: Vec<CellId> = children.keys().copied().collect();
        child_ids.sort_unstable();

        let mut created = Vec::new();
        for child_id in child_ids {
            let child = children
                .get(&child_id)
                .ok_or(HexScaleError::IllegalCellAccess {
                    cell: child_id,
                    resolution,
                })?;
            let parent_id = index.parent(child_id, parent_resolution)?;

            // Already created by a sibling in this pass: only merge residents.
            if let Some(parent) = parents
                .get_mut(&parent_id)
                .filter(|parent| parent.generation == generation)
            {
                parent.residents.extend(child.residents.iter().cloned());
                continue;
            }

            let mut parent = Cell::new(parent_id, parent_resolution, &profile);
            parent.generation = generation;
            parent.residents.extend(child.residents.iter().cloned());
            parents.insert(parent_id, parent);
            created.push(parent_id);
        }

        // Leftovers from an earlier pass are no longer reachable.
        parents.retain(|_, cell| cell.generation == generation);

        let sums = map_cells(&created, |parent_id| {
            children_clipped_sum(index, children, parent_id, resolution)
        })?;
        for (parent_id, sum) in created.iter().zip(sums) {
            let parent = parents
                .get_mut(parent_id)
                .ok_or(HexScaleError::IllegalCellAccess {
                    cell: *parent_id,
                    resolution: parent_resolution,
                })?;
            parent.unclipped_density = sum;
        }

        Ok(created)
    }

    /// Clip phase: cap the cells just created at `resolution`.
    fn clip_level(&mut self, resolution: u8, created: &[CellId]) -> Result<usize> {
        self.apply_occupancy(resolution, created, Comparison::Unclipped)
    }

    /// Count occupied neighbors of `ids` at `resolution`, then clip those
    /// cells. Returns how many ended up clipped.
    fn apply_occupancy(
        &mut self,
        resolution: u8,
        ids: &[CellId],
        comparison: Comparison,
    ) -> Result<usize> {
        let profile = self.config.profile(resolution);
        let index = &self.index;
        let level = &self.levels[resolution as usize];

        let counts = map_cells(ids, |id| {
            occupied_count(index, level, id, &profile, comparison)
        })?;

        let level = &mut self.levels[resolution as usize];
        let mut clipped = 0;
        for (id, occupied) in ids.iter().zip(counts) {
            let cell = level
                .get_mut(id)
                .ok_or(HexScaleError::IllegalCellAccess {
                    cell: *id,
                    resolution,
                })?;
            cell.apply_occupancy(occupied, &profile);
            if cell.is_clipped() {
                clipped += 1;
            }
        }

        Ok(clipped)
    }
}

/// Neighbors of `id` (absent ones counting as density 0) whose compared
/// density reaches the profile's target.
fn occupied_count<I: GeoIndex>(
    index: &I,
    level: &Level,
    id: CellId,
    profile: &ResolutionProfile,
    comparison: Comparison,
) -> Result<u64> {
    let occupied = index
        .neighbors(id)?
        .into_iter()
        .filter(|neighbor| {
            profile.is_occupied(density_of(level, *neighbor, |cell| comparison.of(cell)))
        })
        .count();
    Ok(occupied as u64)
}

/// Sum of clipped densities over every index child of `parent`, including
/// children that were never materialized.
fn children_clipped_sum<I: GeoIndex>(
    index: &I,
    children: &Level,
    parent: CellId,
    child_resolution: u8,
) -> Result<u64> {
    Ok(index
        .children(parent, child_resolution)?
        .into_iter()
        .map(|child| density_of(children, child, |cell| cell.clipped_density))
        .sum())
}

#[cfg(feature = "parallel")]
fn map_cells<T, F>(ids: &[CellId], f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(CellId) -> Result<T> + Sync + Send,
{
    use rayon::prelude::*;
    ids.par_iter().map(|id| f(*id)).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_cells<T, F>(ids: &[CellId], f: F) -> Result<Vec<T>>
where
    F: Fn(CellId) -> Result<T>,
{
    ids.iter().map(|id| f(*id)).collect()
}
