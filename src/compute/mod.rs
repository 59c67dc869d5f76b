//! Compute layer for geocell queries.
//!
//! It provides:
//! - Geocell encoding and neighbor expansion
//! - Coordinate and query argument validation

pub mod geocell;
pub mod validation;
