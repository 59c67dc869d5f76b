//! Geocell encoding and neighbor expansion.
//!
//! The index only relies on two properties of a geocell code:
//! codes sharing a longer prefix describe smaller, nested regions, and every
//! code has a block of same-length neighbors around it.

use crate::error::Result;
use geo::Point;
use geohash::{Coord, Direction, decode_bbox, encode, neighbor};

/// Maps points to fixed-length geocell codes.
pub trait GeocellCodec {
    /// Encodes `point` as a code of exactly `precision` symbols.
    fn encode(&self, point: &Point, precision: usize) -> Result<String>;

    /// Returns `code` followed by its distinct same-length neighbors (a 3×3 block).
    ///
    /// Neighbors past either pole are left out. Longitude wraps, so cells on
    /// the antimeridian include the cells on its far side.
    fn expand(&self, code: &str) -> Result<Vec<String>>;
}

/// Geohash codec backed by the `geohash` crate.
///
/// # Examples
///
/// ```rust
/// use geotrie::compute::geocell::{GeocellCodec, Geohash};
/// use geo::Point;
///
/// let code = Geohash.encode(&Point::new(-0.101599, 51.528642), 6)?;
/// assert_eq!(code, "gcpvjs");
///
/// let block = Geohash.expand(&code)?;
/// assert_eq!(block.len(), 9);
/// assert_eq!(block[0], "gcpvjs");
/// # Ok::<(), geotrie::GeoTrieError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geohash;

impl GeocellCodec for Geohash {
    fn encode(&self, point: &Point, precision: usize) -> Result<String> {
        let coord = Coord {
            x: point.x(),
            y: point.y(),
        };
        Ok(encode(coord, precision)?)
    }

    fn expand(&self, code: &str) -> Result<Vec<String>> {
        // Rejects codes outside the geohash alphabet.
        decode_bbox(code)?;

        let mut cells = Vec::with_capacity(9);
        cells.push(code.to_string());
        for direction in DIRECTIONS {
            match neighbor(code, direction) {
                // Neighbors can coincide near the poles.
                Ok(cell) if !cells.contains(&cell) => cells.push(cell),
                Ok(_) => {}
                Err(_) => log::trace!("cell {} has a neighbor past the pole", code),
            }
        }

        Ok(cells)
    }
}

const DIRECTIONS: [Direction; 8] = [
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
];
