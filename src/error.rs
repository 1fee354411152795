//! Error types for hexscale.

use hexscale_types::cell::CellId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HexScaleError>;

#[derive(Debug, Error)]
pub enum HexScaleError {
    /// Latitude/longitude rejected by validation or by the index.
    #[error("invalid coordinate ({lat}, {lng}): {reason}")]
    InvalidCoordinate { lat: f64, lng: f64, reason: String },

    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("invalid cell index: {0:#x}")]
    InvalidCell(u64),

    /// The base cell for a queried coordinate was never ingested.
    #[error("no resident was ingested at ({lat}, {lng}) (cell {cell})")]
    UnknownLocation { lat: f64, lng: f64, cell: CellId },

    /// Ratio against a zero unclipped density.
    #[error("cell {cell} at resolution {resolution} has zero unclipped density")]
    DegenerateDensity { cell: CellId, resolution: u8 },

    /// A cell assumed present by the hierarchy is missing.
    #[error("cell {cell} is not present at resolution {resolution}")]
    IllegalCellAccess { cell: CellId, resolution: u8 },

    #[error("hierarchy has not been materialized since the last ingestion")]
    NotMaterialized,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HexScaleError {
    fn from(e: serde_json::Error) -> Self {
        HexScaleError::Serialization(e.to_string())
    }
}
