//! Geocell index: points keyed by their geohash in a prefix tree.
//!
//! Every point is stored under its geocell code at the index precision. A
//! radius query picks a coarser search precision from the radius, expands the
//! center cell into its 3×3 neighbor block and gathers everything stored
//! beneath those codes. Because finer codes extend coarser ones, one prefix
//! walk per neighbor returns every candidate in that cell. An exact distance
//! filter removes the false positives.
//!
//! ```text
//! radius 500 m -> precision 6 -> center "gcpvhc"
//!   expand -> [gcpvhc, gcpvhf, gcpvj4, gcpvj1, gcpvj0, gcpvhb, gcpvh8, gcpvh9, gcpvhd]
//!   trie.values_for_prefix(cell) for each   (missing cells are skipped)
//!   keep distance(center, p) <= 500 m
//! ```

use crate::compute::geocell::{GeocellCodec, Geohash};
use crate::compute::validation::{validate_geographic_point, validate_precision, validate_radius};
use crate::config::Config;
use crate::error::{GeoTrieError, Result};
use crate::precision::{DEFAULT_PRECISION, radius_to_precision};
use crate::spatial::{DistanceMetric, distance_between};
use crate::trie::Trie;
use geo::Point;

/// Radius-searchable collection of points with payloads.
///
/// # Thread Safety
///
/// This structure does no internal locking. Concurrent reads through `&GeoTrie`
/// are fine; for shared mutation wrap it in a lock (see `SyncGeoTrie` with the
/// `sync` feature).
///
/// # Examples
///
/// ```rust
/// use geotrie::{GeoTrie, point_from_lat_lon};
///
/// let mut index = GeoTrie::new(8)?;
/// index.add(point_from_lat_lon(51.514138, -0.136282), "Oxford St")?;
/// index.add(point_from_lat_lon(51.517770, -0.140273), "Margaret St")?;
///
/// let center = point_from_lat_lon(51.513284, -0.136539);
/// let hits = index.radius_search(&center, 500.0)?;
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].1, "Oxford St");
/// # Ok::<(), geotrie::GeoTrieError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeoTrie<T, C = Geohash> {
    precision: usize,
    metric: DistanceMetric,
    codec: C,
    trie: Trie<char, (Point, T)>,
    len: usize,
}

impl<T> GeoTrie<T> {
    /// Create an empty index storing points at `precision` (1-12).
    ///
    /// # Errors
    ///
    /// `InvalidPrecision` if `precision` is out of range.
    pub fn new(precision: usize) -> Result<Self> {
        Self::with_config(Config::default().with_precision(precision))
    }

    /// Create an index from configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_codec(config, Geohash)
    }

    /// Create an index at `precision` holding `points`.
    ///
    /// Points are added in order; the first invalid point aborts construction.
    pub fn from_points<I>(points: I, precision: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        let mut index = Self::new(precision)?;
        index.add_many(points)?;
        Ok(index)
    }
}

impl<T> Default for GeoTrie<T> {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            metric: DistanceMetric::default(),
            codec: Geohash,
            trie: Trie::new(),
            len: 0,
        }
    }
}

impl<T, C: GeocellCodec> GeoTrie<T, C> {
    /// Create an index that encodes cells with a custom codec.
    pub fn with_codec(config: Config, codec: C) -> Result<Self> {
        validate_precision(config.precision)?;

        Ok(Self {
            precision: config.precision,
            metric: config.metric,
            codec,
            trie: Trie::new(),
            len: 0,
        })
    }

    /// Geocell code length used for stored points.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Always fails: the precision is fixed once points are keyed by it.
    pub fn set_precision(&mut self, precision: usize) -> Result<()> {
        log::warn!(
            "Attempted to change index precision from {} to {}",
            self.precision,
            precision
        );
        Err(GeoTrieError::ImmutablePrecision {
            current: self.precision,
        })
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The underlying trie, keyed by geocell code.
    pub fn trie(&self) -> &Trie<char, (Point, T)> {
        &self.trie
    }

    /// Geocell code of `point` at the index precision.
    pub fn cell_code(&self, point: &Point) -> Result<String> {
        validate_geographic_point(point)?;
        self.codec.encode(point, self.precision)
    }

    /// Store `point` with its payload.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for out-of-range or non-finite coordinates.
    pub fn add(&mut self, point: Point, data: T) -> Result<()> {
        let code = self.cell_code(&point)?;
        self.trie.add(&code, (point, data));
        self.len += 1;
        Ok(())
    }

    /// Store every `(point, data)` pair in order.
    ///
    /// Not atomic: on error, points added before the failing one remain.
    pub fn add_many<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        for (point, data) in points {
            self.add(point, data)?;
        }
        Ok(())
    }

    /// Geocell precision a query with `radius` meters runs at.
    ///
    /// Never finer than the index precision.
    ///
    /// # Errors
    ///
    /// `PrecisionLookup` if the radius exceeds what the coarsest cell covers.
    pub fn search_precision(&self, radius: f64) -> Result<usize> {
        validate_radius(radius)?;
        let derived =
            radius_to_precision(radius).ok_or(GeoTrieError::PrecisionLookup { radius })?;
        Ok(self.precision.min(derived))
    }

    /// All stored points within `radius` meters of `center`.
    ///
    /// Results from the center cell come first; no other ordering is implied.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid center or a negative/non-finite radius
    /// - `PrecisionLookup` if the radius is too large for any geocell
    pub fn radius_search(&self, center: &Point, radius: f64) -> Result<Vec<&(Point, T)>> {
        validate_geographic_point(center)?;
        let precision = self.search_precision(radius)?;
        let center_code = self.codec.encode(center, precision)?;

        let candidates = self.candidates(&center_code)?;
        let candidate_count = candidates.len();

        let hits: Vec<&(Point, T)> = candidates
            .into_iter()
            .filter(|(point, _)| distance_between(center, point, self.metric) <= radius)
            .collect();

        log::debug!(
            "radius search around {} ({} m, precision {}): {} candidates, {} hits",
            center_code,
            radius,
            precision,
            candidate_count,
            hits.len()
        );

        Ok(hits)
    }

    /// Points within `radius` meters of `center`, nearest first, with their
    /// distances, truncated to `limit`.
    pub fn nearest_within(
        &self,
        center: &Point,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<(&Point, &T, f64)>> {
        let mut results: Vec<(&Point, &T, f64)> = self
            .radius_search(center, radius)?
            .into_iter()
            .map(|(point, data)| (point, data, distance_between(center, point, self.metric)))
            .collect();

        results.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    /// Everything stored in the 3×3 block of cells around `center_code`.
    fn candidates(&self, center_code: &str) -> Result<Vec<&(Point, T)>> {
        let mut hits = Vec::new();

        for cell in self.codec.expand(center_code)? {
            match self.trie.values_for_prefix(cell.as_str()) {
                Ok(values) => hits.extend(values),
                Err(GeoTrieError::KeyNotFound { .. }) => {
                    log::trace!("cell {} is empty", cell);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::point_from_lat_lon;

    #[test]
    fn test_new_index() {
        let index: GeoTrie<()> = GeoTrie::new(7).unwrap();
        assert_eq!(index.precision(), 7);
        assert_eq!(index.metric(), DistanceMetric::Haversine);
        assert!(index.is_empty());
        assert!(index.trie().is_empty());
    }

    #[test]
    fn test_default_precision() {
        let index: GeoTrie<()> = GeoTrie::default();
        assert_eq!(index.precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_invalid_precision() {
        assert!(matches!(
            GeoTrie::<()>::new(0),
            Err(GeoTrieError::InvalidPrecision(0))
        ));
        assert!(GeoTrie::<()>::new(13).is_err());
    }

    #[test]
    fn test_precision_is_immutable() {
        let mut index: GeoTrie<()> = GeoTrie::new(6).unwrap();
        assert!(matches!(
            index.set_precision(8),
            Err(GeoTrieError::ImmutablePrecision { current: 6 })
        ));
        assert_eq!(index.precision(), 6);
    }

    #[test]
    fn test_add_single() {
        let mut index = GeoTrie::new(6).unwrap();
        let point = point_from_lat_lon(51.528642, -0.101599);
        index.add(point, "foo").unwrap();

        assert!(index.trie().has("gcpvjs"));
        assert_eq!(index.trie().values("gcpvjs").unwrap(), &[(point, "foo")]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_add_multiple() {
        let mut index = GeoTrie::new(6).unwrap();

        let first = point_from_lat_lon(51.528642, -0.101599);
        index.add(first, None::<&str>).unwrap();
        assert_eq!(index.trie().values("gcpvjs").unwrap(), &[(first, None)]);

        let second = point_from_lat_lon(51.7505017, -1.3177993);
        index.add(second, None).unwrap();
        assert_eq!(index.trie().values("gcpn6h").unwrap(), &[(second, None)]);

        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_add_many() {
        let mut index = GeoTrie::new(6).unwrap();
        index
            .add_many([
                (point_from_lat_lon(51.528642, -0.101599), ()),
                (point_from_lat_lon(51.7505017, -1.3177993), ()),
            ])
            .unwrap();

        assert!(index.trie().has("gcpvjs"));
        assert!(index.trie().has("gcpn6h"));
    }

    #[test]
    fn test_add_many_is_not_atomic() {
        let mut index = GeoTrie::new(6).unwrap();
        let result = index.add_many([
            (point_from_lat_lon(51.528642, -0.101599), 1),
            (point_from_lat_lon(95.0, 0.0), 2),
            (point_from_lat_lon(51.7505017, -1.3177993), 3),
        ]);

        assert!(matches!(result, Err(GeoTrieError::InvalidInput(_))));
        assert_eq!(index.len(), 1);
        assert!(index.trie().has("gcpvjs"));
        assert!(!index.trie().has("gcpn6h"));
    }

    #[test]
    fn test_from_points() {
        let index = GeoTrie::from_points(
            [
                (point_from_lat_lon(51.528642, -0.101599), 'a'),
                (point_from_lat_lon(51.528642, -0.101599), 'b'),
            ],
            6,
        )
        .unwrap();

        let values: Vec<char> = index
            .trie()
            .values("gcpvjs")
            .unwrap()
            .iter()
            .map(|(_, c)| *c)
            .collect();
        assert_eq!(values, vec!['a', 'b']);
    }

    #[test]
    fn test_search_precision_clamped_to_index() {
        let index: GeoTrie<()> = GeoTrie::new(4).unwrap();
        // 500 m would search at precision 6 on a finer index.
        assert_eq!(index.search_precision(500.0).unwrap(), 4);

        let index: GeoTrie<()> = GeoTrie::new(12).unwrap();
        assert_eq!(index.search_precision(500.0).unwrap(), 6);
        assert_eq!(index.search_precision(0.01).unwrap(), 12);
    }

    #[test]
    fn test_search_precision_oversized_radius() {
        let index: GeoTrie<()> = GeoTrie::new(10).unwrap();
        assert!(matches!(
            index.search_precision(6_000_000.0),
            Err(GeoTrieError::PrecisionLookup { .. })
        ));
    }

    #[test]
    fn test_radius_search_empty_index() {
        let index: GeoTrie<()> = GeoTrie::new(8).unwrap();
        let center = point_from_lat_lon(51.513284, -0.136539);
        assert!(index.radius_search(&center, 500.0).unwrap().is_empty());
    }

    #[test]
    fn test_radius_search_zero_radius() {
        let mut index = GeoTrie::new(12).unwrap();
        let center = point_from_lat_lon(51.513284, -0.136539);
        index.add(center, "here").unwrap();
        index
            .add(point_from_lat_lon(51.514138, -0.136282), "there")
            .unwrap();

        let hits = index.radius_search(&center, 0.0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, "here");
    }

    #[test]
    fn test_radius_search_rejects_bad_arguments() {
        let index: GeoTrie<()> = GeoTrie::new(8).unwrap();
        let center = point_from_lat_lon(51.513284, -0.136539);

        assert!(matches!(
            index.radius_search(&center, -5.0),
            Err(GeoTrieError::InvalidInput(_))
        ));
        assert!(matches!(
            index.radius_search(&Point::new(f64::NAN, 0.0), 5.0),
            Err(GeoTrieError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nearest_within() {
        let mut index = GeoTrie::new(8).unwrap();
        index
            .add(point_from_lat_lon(51.513284, -0.135724), "B")
            .unwrap();
        index
            .add(point_from_lat_lon(51.514138, -0.136282), "A")
            .unwrap();
        index
            .add(point_from_lat_lon(51.517770, -0.140273), "C")
            .unwrap();

        let center = point_from_lat_lon(51.513284, -0.136539);
        let nearest = index.nearest_within(&center, 500.0, 10).unwrap();

        let names: Vec<&str> = nearest.iter().map(|(_, name, _)| **name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(nearest[0].2 <= nearest[1].2);

        let nearest = index.nearest_within(&center, 500.0, 1).unwrap();
        assert_eq!(nearest.len(), 1);
        assert_eq!(*nearest[0].1, "B");
    }

    #[test]
    fn test_custom_metric_from_config() {
        let config = Config::default()
            .with_precision(8)
            .with_metric(DistanceMetric::Geodesic);
        let mut index = GeoTrie::with_config(config).unwrap();
        index
            .add(point_from_lat_lon(51.514138, -0.136282), 1)
            .unwrap();

        assert_eq!(index.metric(), DistanceMetric::Geodesic);
        let center = point_from_lat_lon(51.513284, -0.136539);
        assert_eq!(index.radius_search(&center, 500.0).unwrap().len(), 1);
    }

    #[test]
    fn test_every_metric_filters_in_meters() {
        let center = point_from_lat_lon(51.513284, -0.136539);
        // About 562 m from the center, stored in the northern neighbor cell.
        let beyond = point_from_lat_lon(51.517770, -0.140273);

        for metric in [DistanceMetric::Haversine, DistanceMetric::Geodesic] {
            let config = Config::default().with_precision(8).with_metric(metric);
            let mut index = GeoTrie::with_config(config).unwrap();
            index.add(beyond, "C").unwrap();

            assert!(index.radius_search(&center, 500.0).unwrap().is_empty());
            assert_eq!(index.radius_search(&center, 600.0).unwrap().len(), 1);
        }
    }
}
