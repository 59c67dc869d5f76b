//! Geocell precision levels and the radius → precision heuristic.

/// Precision used when none is configured.
pub const DEFAULT_PRECISION: usize = 10;

/// Finest supported geocell precision.
pub const MAX_PRECISION: usize = 12;

/// Coarsest supported geocell precision.
pub const MIN_PRECISION: usize = 1;

/// Approximate cell size in meters for each precision, finest first.
pub const PRECISION_LEVELS: [(f64, usize); 12] = [
    (0.00925, 12),
    (0.074, 11),
    (0.6, 10),
    (2.4, 9),
    (19.0, 8),
    (76.0, 7),
    (610.0, 6),
    (2_400.0, 5),
    (20_000.0, 4),
    (78_000.0, 3),
    (630_000.0, 2),
    (2_500_000.0, 1),
];

/// Finest precision whose cell size is at least half of `radius` meters.
///
/// Returns `None` when even the coarsest cell is too small for the radius.
///
/// # Examples
///
/// ```rust
/// use geotrie::precision::radius_to_precision;
///
/// assert_eq!(radius_to_precision(500.0), Some(6));
/// assert_eq!(radius_to_precision(1.0), Some(10));
/// assert_eq!(radius_to_precision(6_000_000.0), None);
/// ```
pub fn radius_to_precision(radius: f64) -> Option<usize> {
    let half = radius / 2.0;
    PRECISION_LEVELS
        .iter()
        .find(|(size, _)| *size >= half)
        .map(|(_, precision)| *precision)
}

/// Returns `true` if `precision` is a supported geocell length.
pub fn is_valid_precision(precision: usize) -> bool {
    (MIN_PRECISION..=MAX_PRECISION).contains(&precision)
}
