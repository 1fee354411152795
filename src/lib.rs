//! Hexagonal density hierarchy and reward scaling for located nodes.
//!
//! Residents are ingested into cells at the finest working resolution, the
//! hierarchy is materialized once, and reward scales are read back per
//! location.
//!
//! ```rust
//! use hexscale::{Config, DensityHierarchy};
//!
//! let mut hierarchy = DensityHierarchy::new(Config::default())?;
//! hierarchy.add_resident(37.7749, -122.4194, "quiet-lime-owl")?;
//! hierarchy.materialize()?;
//!
//! let scale = hierarchy.reward_scale(37.7749, -122.4194)?;
//! assert_eq!(scale, 1.0);
//! # Ok::<(), hexscale::HexScaleError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod graph;
pub mod hierarchy;

pub use builder::HierarchyBuilder;
pub use compute::{GeoIndex, H3Index};
pub use config::{Config, ResolutionProfile};
pub use error::{HexScaleError, Result};
pub use graph::{Node, RewardGraph};
pub use hierarchy::{Cell, DensityHierarchy, HierarchyStats, LevelStats};

#[cfg(feature = "sync")]
pub use hierarchy::SyncHierarchy;

#[cfg(feature = "geojson")]
pub use compute::geojson::hierarchy_to_geojson;

pub use hexscale_types::cell::CellId;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        Cell, CellId, Config, DensityHierarchy, HexScaleError, HierarchyBuilder, Result,
        ResolutionProfile,
    };

    pub use crate::{Node, RewardGraph};

    pub use crate::{GeoIndex, H3Index};

    #[cfg(feature = "sync")]
    pub use crate::SyncHierarchy;
}
