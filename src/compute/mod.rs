//! Compute layer: geospatial index access, input validation and export.
//!
//! Everything here is independent of how the hierarchy stores its cells.

pub mod index;
pub mod validation;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use index::{CellSet, GeoIndex, H3Index};
