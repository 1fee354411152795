//! Validation for coordinates and resolutions.

use crate::error::{HexScaleError, Result};

/// Finest resolution the grid supports.
pub const MAX_GRID_RESOLUTION: u8 = 15;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use hexscale::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(40.7128, -74.0060).is_ok());
///
/// // Latitude out of range
/// assert!(validate_coordinate(95.0, -74.0).is_err());
///
/// // Not a number
/// assert!(validate_coordinate(f64::NAN, 0.0).is_err());
/// ```
pub fn validate_coordinate(lat: f64, lng: f64) -> Result<()> {
    let invalid = |reason: String| HexScaleError::InvalidCoordinate { lat, lng, reason };

    if !lat.is_finite() {
        return Err(invalid(format!("Latitude must be finite, got: {}", lat)));
    }

    if !lng.is_finite() {
        return Err(invalid(format!("Longitude must be finite, got: {}", lng)));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(invalid(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }

    Ok(())
}

/// Validates that `resolution` exists on the grid.
///
/// # Examples
///
/// ```
/// use hexscale::compute::validation::validate_resolution;
///
/// assert!(validate_resolution(11).is_ok());
/// assert!(validate_resolution(16).is_err());
/// ```
pub fn validate_resolution(resolution: u8) -> Result<()> {
    if resolution > MAX_GRID_RESOLUTION {
        return Err(HexScaleError::InvalidResolution(format!(
            "Resolution out of range [0, {}]: {}",
            MAX_GRID_RESOLUTION, resolution
        )));
    }
    Ok(())
}

/// Validates that `target` is strictly coarser than `current`.
pub fn validate_coarser(current: u8, target: u8) -> Result<()> {
    validate_resolution(target)?;
    if target >= current {
        return Err(HexScaleError::InvalidResolution(format!(
            "Parent resolution {} must be coarser than {}",
            target, current
        )));
    }
    Ok(())
}

/// Validates that `target` is strictly finer than `current`.
pub fn validate_finer(current: u8, target: u8) -> Result<()> {
    validate_resolution(target)?;
    if target <= current {
        return Err(HexScaleError::InvalidResolution(format!(
            "Child resolution {} must be finer than {}",
            target, current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(validate_coordinate(0.0, 0.0).is_ok());
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_invalid_longitude() {
        let err = validate_coordinate(10.0, 181.0).unwrap_err();
        assert!(matches!(err, HexScaleError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_infinite_latitude() {
        assert!(validate_coordinate(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_resolution_ordering() {
        assert!(validate_coarser(11, 10).is_ok());
        assert!(validate_coarser(11, 11).is_err());
        assert!(validate_finer(10, 11).is_ok());
        assert!(validate_finer(10, 9).is_err());
        assert!(validate_finer(10, 16).is_err());
    }
}
