use serde::{Deserialize, Serialize};

/// Number of resolutions covered by a profile table (0 through 12).
pub const PROFILE_COUNT: usize = 13;

/// Finest resolution that is materialized by default.
pub const DEFAULT_RES_MAX: u8 = 11;

/// Coarsest resolution that is materialized by default.
pub const DEFAULT_RES_MIN: u8 = 3;

/// Density tuning for one grid resolution.
///
/// * `siblings` - the sibling threshold `N`: how many occupied neighbors a
///   cell tolerates before its limit starts growing
/// * `target` - density at which a neighbor counts as occupied
/// * `max` - hard cap on the density limit
///
/// # Examples
///
/// ```
/// use hexscale_types::profile::ResolutionProfile;
///
/// let profile = ResolutionProfile::new(2, 5, 20);
/// // fewer than N occupied neighbors: limit is the target itself
/// assert_eq!(profile.density_limit(0), 5);
/// assert_eq!(profile.density_limit(2), 5);
/// // every extra occupied neighbor adds one target, capped at max
/// assert_eq!(profile.density_limit(3), 10);
/// assert_eq!(profile.density_limit(7), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionProfile {
    pub siblings: u64,
    pub target: u64,
    pub max: u64,
}

impl ResolutionProfile {
    pub const fn new(siblings: u64, target: u64, max: u64) -> Self {
        Self {
            siblings,
            target,
            max,
        }
    }

    /// Profile used outside the working band; its limit is never reached.
    pub const fn sentinel() -> Self {
        Self::new(2, 100_000, 100_000)
    }

    /// `min(target * max(occupied - N + 1, 1), max)`, saturating instead of
    /// overflowing.
    pub fn density_limit(&self, occupied: u64) -> u64 {
        let factor = occupied.saturating_add(1).saturating_sub(self.siblings).max(1);
        self.target.saturating_mul(factor).min(self.max)
    }

    /// Whether a neighbor at `density` counts as occupied.
    #[inline]
    pub fn is_occupied(&self, density: u64) -> bool {
        density >= self.target
    }
}

impl Default for ResolutionProfile {
    fn default() -> Self {
        Self::sentinel()
    }
}

/// HIP-17 table, indexed by resolution.
pub const DEFAULT_PROFILES: [ResolutionProfile; PROFILE_COUNT] = [
    ResolutionProfile::sentinel(),
    ResolutionProfile::sentinel(),
    ResolutionProfile::sentinel(),
    ResolutionProfile::sentinel(),
    ResolutionProfile::new(1, 250, 800),
    ResolutionProfile::new(1, 100, 400),
    ResolutionProfile::new(1, 25, 100),
    ResolutionProfile::new(2, 5, 20),
    ResolutionProfile::new(2, 1, 4),
    ResolutionProfile::new(2, 1, 2),
    ResolutionProfile::new(2, 1, 1),
    ResolutionProfile::sentinel(),
    ResolutionProfile::sentinel(),
];
