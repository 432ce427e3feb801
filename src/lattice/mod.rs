//! Fixed-precision integer lattice used by the polygon clip stage.
//!
//! Continuous coordinates are quantized once on the way in and dequantized
//! once on the way out. Everything in between compares exactly.

mod polygon_set;
mod quantizer;

pub use polygon_set::{FillRule, LatticeBounds, Loop, PolygonSet};
pub use quantizer::{Quantizer, FEET_TO_MM, ZERO_EPSILON};

/// A quantized 2D coordinate.
///
/// Ordered lexicographically by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticePoint {
    /// Quantized x coordinate.
    pub x: i64,
    /// Quantized y coordinate.
    pub y: i64,
}

impl LatticePoint {
    /// Creates a lattice point from raw grain units.
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}
