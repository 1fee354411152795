//! Multi-resolution hexagon density hierarchy.
//!
//! Residents are ingested at the finest resolution of the working band.
//! `materialize` then clips the base cells, aggregates them level by level up
//! to the coarsest resolution and clips every level against its neighbors.
//! Once materialized the hierarchy is a read-only structure answering
//! `reward_scale` queries.

use rustc_hash::FxHashMap;

use hexscale_types::cell::CellId;

use crate::compute::index::{GeoIndex, H3Index};
use crate::config::Config;
use crate::error::{HexScaleError, Result};

mod cell;
mod materialize;
mod query;
mod stats;

#[cfg(feature = "sync")]
mod sync;

pub use cell::Cell;
pub use stats::{HierarchyStats, LevelStats};

#[cfg(feature = "sync")]
pub use sync::SyncHierarchy;

/// All cells of one resolution.
pub(crate) type Level = FxHashMap<CellId, Cell>;

/// Density hierarchy over a geospatial index.
///
/// Ingestion and materialization take `&mut self`; queries take `&self`, so a
/// materialized hierarchy can be shared across threads (e.g. behind an `Arc`)
/// without further locking.
pub struct DensityHierarchy<I: GeoIndex = H3Index> {
    pub(crate) config: Config,
    pub(crate) index: I,
    /// One level per resolution `0..=res_max`; only the working band is filled
    pub(crate) levels: Vec<Level>,
    pub(crate) generation: u64,
    pub(crate) materialized: bool,
    pub(crate) resident_count: usize,
}

impl DensityHierarchy<H3Index> {
    /// Create an empty hierarchy on the H3 grid.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_index(config, H3Index::new())
    }

    pub fn builder() -> crate::builder::HierarchyBuilder {
        crate::builder::HierarchyBuilder::new()
    }
}

impl<I: GeoIndex> DensityHierarchy<I> {
    /// Create an empty hierarchy over a custom index.
    pub fn with_index(config: Config, index: I) -> Result<Self> {
        config.validate().map_err(HexScaleError::InvalidConfig)?;
        let levels = (0..=config.res_max).map(|_| Level::default()).collect();

        Ok(Self {
            config,
            index,
            levels,
            generation: 0,
            materialized: false,
            resident_count: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Ingest one resident at `(lat, lng)` and return its base cell.
    ///
    /// Ingesting the same resident twice counts it twice. Ingesting into a
    /// materialized hierarchy marks it stale until the next `materialize`.
    pub fn add_resident(
        &mut self,
        lat: f64,
        lng: f64,
        resident: impl Into<String>,
    ) -> Result<CellId> {
        let res_max = self.config.res_max;
        let id = self.index.locate(lat, lng, res_max)?;
        let profile = self.config.profile(res_max);

        let cell = self.levels[res_max as usize]
            .entry(id)
            .or_insert_with(|| Cell::new(id, res_max, &profile));
        cell.raw_density += 1;
        cell.residents.push(resident.into());
        self.resident_count += 1;

        if self.materialized {
            log::debug!("Ingestion after materialization; hierarchy is stale until rebuilt");
            self.materialized = false;
        }

        Ok(id)
    }

    /// Ingest many `(lat, lng, resident)` records, stopping at the first error.
    pub fn add_residents<S, T>(&mut self, residents: T) -> Result<usize>
    where
        S: Into<String>,
        T: IntoIterator<Item = (f64, f64, S)>,
    {
        let mut added = 0;
        for (lat, lng, resident) in residents {
            self.add_resident(lat, lng, resident)?;
            added += 1;
        }
        Ok(added)
    }

    /// Whether the current densities reflect every ingested resident.
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Number of ingested residents, counting repeats.
    pub fn resident_count(&self) -> usize {
        self.resident_count
    }

    pub fn is_empty(&self) -> bool {
        self.resident_count == 0
    }

    /// Current materialization pass, 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Copy of the cell `id`, if present.
    pub fn cell(&self, id: CellId) -> Result<Option<Cell>> {
        let resolution = self.index.resolution_of(id)?;
        Ok(self
            .level(resolution)
            .and_then(|level| level.get(&id))
            .cloned())
    }

    /// Copies of all cells at `resolution`, ordered by id.
    pub fn cells_at(&self, resolution: u8) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .level(resolution)
            .map(|level| level.values().cloned().collect())
            .unwrap_or_default();
        cells.sort_unstable_by_key(|cell| cell.id);
        cells
    }

    /// Clipped density of `id`; 0 for cells that were never materialized.
    pub fn clipped_density(&self, id: CellId) -> Result<u64> {
        let resolution = self.index.resolution_of(id)?;
        Ok(self
            .level(resolution)
            .map_or(0, |level| density_of(level, id, |cell| cell.clipped_density)))
    }

    /// Unclipped density of `id`; 0 for cells that were never materialized.
    pub fn unclipped_density(&self, id: CellId) -> Result<u64> {
        let resolution = self.index.resolution_of(id)?;
        Ok(self
            .level(resolution)
            .map_or(0, |level| density_of(level, id, |cell| cell.unclipped_density)))
    }

    #[inline]
    pub(crate) fn level(&self, resolution: u8) -> Option<&Level> {
        if self.config.in_band(resolution) {
            self.levels.get(resolution as usize)
        } else {
            None
        }
    }
}

impl Default for DensityHierarchy<H3Index> {
    fn default() -> Self {
        Self {
            config: Config::default(),
            index: H3Index::new(),
            levels: (0..=Config::default().res_max)
                .map(|_| Level::default())
                .collect(),
            generation: 0,
            materialized: false,
            resident_count: 0,
        }
    }
}

impl<I: GeoIndex> std::fmt::Debug for DensityHierarchy<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DensityHierarchy")
            .field("res_min", &self.config.res_min)
            .field("res_max", &self.config.res_max)
            .field("residents", &self.resident_count)
            .field("generation", &self.generation)
            .field("materialized", &self.materialized)
            .finish()
    }
}

/// Total density lookup: cells absent from `level` count as 0.
#[inline]
pub(crate) fn density_of(level: &Level, id: CellId, select: impl Fn(&Cell) -> u64) -> u64 {
    level.get(&id).map_or(0, select)
}
