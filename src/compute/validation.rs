//! Validation for geographic coordinates and query arguments.

use crate::error::{GeoTrieError, Result};
use crate::precision::{MAX_PRECISION, MIN_PRECISION, is_valid_precision};
use geo::Point;

/// Checks that `point` is a usable (lon, lat) pair before it is encoded.
///
/// Latitude must lie in [-90, 90] and longitude in [-180, 180]; both poles and
/// both sides of the date line are accepted. NaN and infinities are rejected.
///
/// # Examples
///
/// ```
/// use geotrie::compute::validation::validate_geographic_point;
/// use geotrie::point_from_lat_lon;
///
/// assert!(validate_geographic_point(&point_from_lat_lon(51.513284, -0.136539)).is_ok());
/// assert!(validate_geographic_point(&point_from_lat_lon(-90.0, 180.0)).is_ok());
///
/// // Sydney with latitude and longitude swapped
/// assert!(validate_geographic_point(&point_from_lat_lon(151.2093, -33.8688)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    check_axis("Latitude", point.y(), 90.0)?;
    check_axis("Longitude", point.x(), 180.0)
}

fn check_axis(axis: &str, value: f64, limit: f64) -> Result<()> {
    if value.is_nan() || value.abs() > limit {
        return Err(reject(format!(
            "{} {} is outside [-{}, {}]",
            axis, value, limit, limit
        )));
    }
    Ok(())
}

/// Validates a search radius in meters is finite and non-negative.
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(reject(format!("Radius must be finite, got: {}", radius)));
    }

    if radius < 0.0 {
        return Err(reject(format!(
            "Radius must be non-negative, got: {}",
            radius
        )));
    }

    Ok(())
}

/// Validates a geocell precision lies within the supported range.
pub fn validate_precision(precision: usize) -> Result<()> {
    if is_valid_precision(precision) {
        Ok(())
    } else {
        log::warn!(
            "Rejecting precision {} outside [{}, {}]",
            precision,
            MIN_PRECISION,
            MAX_PRECISION
        );
        Err(GeoTrieError::InvalidPrecision(precision))
    }
}

fn reject(message: String) -> GeoTrieError {
    log::warn!("{}", message);
    GeoTrieError::InvalidInput(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::point_from_lat_lon;

    #[test]
    fn test_valid_geographic_point() {
        let london = Point::new(-0.1278, 51.5074);
        assert!(validate_geographic_point(&london).is_ok());

        let tokyo = Point::new(139.6917, 35.6895);
        assert!(validate_geographic_point(&tokyo).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-200.0, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, 90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -95.0)).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        let nan_lon = Point::new(f64::NAN, 40.0);
        assert!(matches!(
            validate_geographic_point(&nan_lon),
            Err(GeoTrieError::InvalidInput(_))
        ));

        let inf_lat = Point::new(-74.0, f64::INFINITY);
        assert!(validate_geographic_point(&inf_lat).is_err());
    }

    #[test]
    fn test_swapped_lat_lon_rejected() {
        let sydney = point_from_lat_lon(-33.8688, 151.2093);
        assert!(validate_geographic_point(&sydney).is_ok());

        let swapped = point_from_lat_lon(151.2093, -33.8688);
        match validate_geographic_point(&swapped) {
            Err(GeoTrieError::InvalidInput(message)) => assert!(message.starts_with("Latitude")),
            other => panic!("expected latitude rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(0.0).is_ok());
        assert!(validate_radius(500.0).is_ok());
        assert!(validate_radius(-1.0).is_err());
        assert!(validate_radius(f64::NAN).is_err());
        assert!(validate_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_precision() {
        assert!(validate_precision(1).is_ok());
        assert!(validate_precision(12).is_ok());
        assert!(matches!(
            validate_precision(0),
            Err(GeoTrieError::InvalidPrecision(0))
        ));
        assert!(validate_precision(13).is_err());
    }
}
