//! Geospatial index abstraction for hexscale
//!
//! The density engine never talks to a grid library directly. It goes through
//! `GeoIndex`, which covers the handful of operations the hierarchy needs:
//! coordinate to cell, cell resolution, parent, children and the distance-1
//! disk. `H3Index` is the production implementation on top of `h3o`.

use geo::{LineString, Polygon};
use h3o::{CellIndex, LatLng, Resolution};
use hexscale_types::cell::CellId;
use smallvec::SmallVec;

use crate::compute::validation::{validate_coarser, validate_coordinate, validate_finer};
use crate::error::{HexScaleError, Result};

/// A small set of cells; a hexagon has six neighbors plus itself and seven
/// children one level down.
pub type CellSet = SmallVec<[CellId; 7]>;

/// Trait for geospatial index implementations
pub trait GeoIndex: Send + Sync {
    /// Cell containing `(lat, lng)` at `resolution`.
    fn locate(&self, lat: f64, lng: f64, resolution: u8) -> Result<CellId>;

    /// Resolution of `cell`.
    fn resolution_of(&self, cell: CellId) -> Result<u8>;

    /// Ancestor of `cell` at the strictly coarser `resolution`.
    fn parent(&self, cell: CellId, resolution: u8) -> Result<CellId>;

    /// All descendants of `cell` at the strictly finer `resolution`.
    fn children(&self, cell: CellId, resolution: u8) -> Result<CellSet>;

    /// Cells within grid distance 1 of `cell`, following the index's own
    /// convention on whether `cell` itself is included.
    fn neighbors(&self, cell: CellId) -> Result<CellSet>;

    /// Cell outline as a polygon (x = longitude, y = latitude).
    fn boundary(&self, cell: CellId) -> Result<Polygon<f64>>;
}

/// H3 index backed by `h3o`.
///
/// Neighbors are the `grid_disk(1)` of a cell, which includes the cell itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Index;

impl H3Index {
    pub fn new() -> Self {
        Self
    }

    fn cell(cell: CellId) -> Result<CellIndex> {
        CellIndex::try_from(cell.raw()).map_err(|_| HexScaleError::InvalidCell(cell.raw()))
    }

    fn resolution(resolution: u8) -> Result<Resolution> {
        Resolution::try_from(resolution)
            .map_err(|e| HexScaleError::InvalidResolution(format!("{}: {}", resolution, e)))
    }

    #[inline]
    fn id(cell: CellIndex) -> CellId {
        CellId::new(u64::from(cell))
    }
}

impl GeoIndex for H3Index {
    fn locate(&self, lat: f64, lng: f64, resolution: u8) -> Result<CellId> {
        validate_coordinate(lat, lng)?;
        let resolution = Self::resolution(resolution)?;
        let latlng = LatLng::new(lat, lng).map_err(|e| HexScaleError::InvalidCoordinate {
            lat,
            lng,
            reason: e.to_string(),
        })?;
        Ok(Self::id(latlng.to_cell(resolution)))
    }

    fn resolution_of(&self, cell: CellId) -> Result<u8> {
        Ok(u8::from(Self::cell(cell)?.resolution()))
    }

    fn parent(&self, cell: CellId, resolution: u8) -> Result<CellId> {
        let index = Self::cell(cell)?;
        validate_coarser(u8::from(index.resolution()), resolution)?;
        index
            .parent(Self::resolution(resolution)?)
            .map(Self::id)
            .ok_or_else(|| {
                HexScaleError::InvalidResolution(format!(
                    "Cell {} has no parent at resolution {}",
                    cell, resolution
                ))
            })
    }

    fn children(&self, cell: CellId, resolution: u8) -> Result<CellSet> {
        let index = Self::cell(cell)?;
        validate_finer(u8::from(index.resolution()), resolution)?;
        Ok(index
            .children(Self::resolution(resolution)?)
            .map(Self::id)
            .collect())
    }

    fn neighbors(&self, cell: CellId) -> Result<CellSet> {
        let index = Self::cell(cell)?;
        Ok(index.grid_disk::<Vec<_>>(1).into_iter().map(Self::id).collect())
    }

    fn boundary(&self, cell: CellId) -> Result<Polygon<f64>> {
        let index = Self::cell(cell)?;
        let ring: Vec<(f64, f64)> = index
            .boundary()
            .iter()
            .map(|vertex| (vertex.lng(), vertex.lat()))
            .collect();
        Ok(Polygon::new(LineString::from(ring), vec![]))
    }
}
