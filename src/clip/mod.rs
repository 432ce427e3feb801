//! Polygon intersection engines.
//!
//! The top-face pipeline only needs one primitive from an engine: the
//! intersection of two closed loop sets on the integer lattice. Any engine
//! that honours that contract can stand in via [`PolygonClipper`].

mod geo_clipper;

pub use geo_clipper::GeoClipper;

use crate::error::Result;
use crate::lattice::PolygonSet;

/// Computes the intersection of two polygon sets.
///
/// Contract:
/// - every loop is closed, the closing edge implied;
/// - each operand is resolved under its own fill rule before intersecting,
///   so nested loops become holes;
/// - the result lives on the same lattice as the inputs;
/// - an empty operand gives an empty result, not an error.
pub trait PolygonClipper {
    /// Intersects `subject` with `clip`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipError`](crate::error::ClipError) if the engine cannot
    /// represent the input (unsupported fill rule, coordinate range).
    fn intersect(&self, subject: &PolygonSet, clip: &PolygonSet) -> Result<PolygonSet>;
}
