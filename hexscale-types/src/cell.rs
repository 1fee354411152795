use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a grid cell.
///
/// The value is the raw 64-bit index handed out by the geospatial index. It is
/// unique within a resolution; the resolution itself is recovered through the
/// index, never by inspecting the bits here.
///
/// Formats as lowercase hex, the way H3 indexes are usually written.
///
/// # Examples
///
/// ```
/// use hexscale_types::cell::CellId;
///
/// let id: CellId = "8b2a1072b59ffff".parse().unwrap();
/// assert_eq!(id.to_string(), "8b2a1072b59ffff");
/// assert_eq!(u64::from(id), 0x8b2a1072b59ffff);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u64);

impl CellId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for CellId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<CellId> for u64 {
    fn from(id: CellId) -> Self {
        id.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl FromStr for CellId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s.trim(), 16).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_display_roundtrip() {
        let id = CellId::new(0x8b2a_1072_b59f_ffff);
        let text = id.to_string();
        assert_eq!(text, "8b2a1072b59ffff");
        assert_eq!(text.parse::<CellId>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-cell".parse::<CellId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = CellId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
