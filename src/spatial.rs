//! Distance calculations between geographic points, backed by the geo crate.
//!
//! Points follow the geo convention: `x` is longitude and `y` is latitude.

use geo::{Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Great-circle metrics for the final radius filter. Both return meters.
///
/// - **Haversine**: Fast spherical distance, good for most lon/lat calculations
/// - **Geodesic**: More accurate ellipsoidal distance (Karney 2013), slower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
}

/// Calculate the distance in meters between two points using `metric`.
///
/// # Examples
///
/// ```rust
/// use geotrie::spatial::{distance_between, point_from_lat_lon, DistanceMetric};
///
/// let soho = point_from_lat_lon(51.513284, -0.136539);
/// let oxford_st = point_from_lat_lon(51.514138, -0.136282);
///
/// let dist = distance_between(&soho, &oxford_st, DistanceMetric::Haversine);
/// assert!(dist > 90.0 && dist < 100.0);
/// ```
pub fn distance_between(point1: &Point, point2: &Point, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => Haversine.distance(*point1, *point2),
        DistanceMetric::Geodesic => Geodesic.distance(*point1, *point2),
    }
}

/// Build a point from a `(latitude, longitude)` pair.
pub fn point_from_lat_lon(lat: f64, lon: f64) -> Point {
    Point::new(lon, lat)
}
