//! # hexscale-types
//!
//! Core value types shared by the hexscale density engine:
//!
//! - **Cell identifiers**: `CellId`, an opaque 64-bit hexagon index
//! - **Resolution profiles**: `ResolutionProfile`, the `(N, target, max)` tuning
//!   for one grid resolution, plus the HIP-17 default table
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use hexscale_types::cell::CellId;
//! use hexscale_types::profile::{ResolutionProfile, DEFAULT_PROFILES};
//!
//! let cell: CellId = "8b2a1072b59ffff".parse().unwrap();
//! assert_eq!(cell.to_string(), "8b2a1072b59ffff");
//!
//! let res8: ResolutionProfile = DEFAULT_PROFILES[8];
//! assert_eq!(res8.target, 1);
//! assert_eq!(res8.max, 4);
//! ```

pub mod cell;
pub mod profile;
