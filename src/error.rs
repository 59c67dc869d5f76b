//! Error types for trie lookups and geocell queries.

use thiserror::Error;

/// Errors produced by the trie and the geocell index.
#[derive(Debug, Error)]
pub enum GeoTrieError {
    /// The exact key or prefix path does not exist in the trie.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// No geocell in the precision table is coarse enough for the radius.
    #[error("no geocell precision covers a radius of {radius} meters")]
    PrecisionLookup { radius: f64 },

    /// The index precision was changed after construction.
    #[error("index precision is fixed at construction (currently {current})")]
    ImmutablePrecision { current: usize },

    /// Precision outside the supported geocell range.
    #[error("precision must be between 1 and 12, got {0}")]
    InvalidPrecision(usize),

    /// Malformed coordinates or query arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The geocell encoder rejected its input.
    #[error("geocell encoding failed: {0}")]
    Geocell(#[from] geohash::GeohashError),
}

pub type Result<T> = std::result::Result<T, GeoTrieError>;
