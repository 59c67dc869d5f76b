//! Geospatial radius search over geohash cells, backed by a prefix tree.
//!
//! ## Features
//! - **Generic trie**: multimap over symbol sequences with exact, prefix and
//!   lazy subtree lookups
//! - **Geocell index**: points keyed by geohash, radius queries through
//!   neighbor-cell expansion plus exact distance filtering
//! - **Configurable**: precision and distance metric from JSON (or TOML with the
//!   `toml` feature)
//! - **Shared access**: `SyncGeoTrie` behind the `sync` feature
//!
//! ```rust
//! use geotrie::{GeoTrie, point_from_lat_lon};
//!
//! let mut index = GeoTrie::new(8)?;
//! index.add(point_from_lat_lon(51.514138, -0.136282), "A")?;
//! index.add(point_from_lat_lon(51.513284, -0.135724), "B")?;
//!
//! let center = point_from_lat_lon(51.513284, -0.136539);
//! let nearby = index.radius_search(&center, 500.0)?;
//! assert_eq!(nearby.len(), 2);
//! # Ok::<(), geotrie::GeoTrieError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod precision;
pub mod spatial;
#[cfg(feature = "sync")]
pub mod sync;
pub mod trie;

pub use config::Config;
pub use error::{GeoTrieError, Result};
pub use index::GeoTrie;
pub use trie::{PrefixValues, Trie, TrieKey};

#[cfg(feature = "sync")]
pub use sync::SyncGeoTrie;

pub use compute::geocell::{GeocellCodec, Geohash};
pub use precision::{DEFAULT_PRECISION, PRECISION_LEVELS, radius_to_precision};
pub use spatial::{DistanceMetric, distance_between, point_from_lat_lon};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GeoTrie, GeoTrieError, Result, Trie};

    #[cfg(feature = "sync")]
    pub use crate::SyncGeoTrie;

    pub use crate::{DistanceMetric, GeocellCodec, Geohash, point_from_lat_lon};

    pub use geo::Point;
}
