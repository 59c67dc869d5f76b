//! Thread-safe wrapper for shared index access.
//!
//! `GeoTrie` does no locking of its own. `SyncGeoTrie` guards the whole index
//! with a single `RwLock`: any number of concurrent searches, one writer at a
//! time. Query results are cloned out because borrows cannot outlive the guard.

use crate::config::Config;
use crate::error::Result;
use crate::index::GeoTrie;
use geo::Point;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe, cheaply clonable handle to a `GeoTrie`.
pub struct SyncGeoTrie<T> {
    inner: Arc<RwLock<GeoTrie<T>>>,
}

impl<T> Clone for SyncGeoTrie<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<GeoTrie<T>> for SyncGeoTrie<T> {
    fn from(index: GeoTrie<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }
}

impl<T> SyncGeoTrie<T> {
    /// Create an empty shared index at `precision`.
    pub fn new(precision: usize) -> Result<Self> {
        Ok(GeoTrie::new(precision)?.into())
    }

    /// Create an empty shared index from configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(GeoTrie::with_config(config)?.into())
    }

    pub fn precision(&self) -> usize {
        self.inner.read().precision()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Store `point` with its payload.
    pub fn add(&self, point: Point, data: T) -> Result<()> {
        self.inner.write().add(point, data)
    }

    /// Store every pair under one write lock. Not atomic on error.
    pub fn add_many<I>(&self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        self.inner.write().add_many(points)
    }

    /// Run `f` against the index under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&GeoTrie<T>) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }
}

impl<T: Clone> SyncGeoTrie<T> {
    /// All stored points within `radius` meters of `center`.
    pub fn radius_search(&self, center: &Point, radius: f64) -> Result<Vec<(Point, T)>> {
        let index = self.inner.read();
        let hits = index.radius_search(center, radius)?;
        Ok(hits.into_iter().cloned().collect())
    }

    /// Nearest points within `radius` meters, with distances, up to `limit`.
    pub fn nearest_within(
        &self,
        center: &Point,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<(Point, T, f64)>> {
        let index = self.inner.read();
        let hits = index.nearest_within(center, radius, limit)?;
        Ok(hits
            .into_iter()
            .map(|(point, data, dist)| (*point, data.clone(), dist))
            .collect())
    }
}
