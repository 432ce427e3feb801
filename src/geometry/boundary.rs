use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point3;

use super::curve::Line;

/// An ordered chain of straight segments bounding one intersection loop.
///
/// Each segment starts where the previous one ends, and the last segment
/// returns to the start of the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryCurveSequence {
    segments: Vec<Line>,
}

impl BoundaryCurveSequence {
    /// Wraps an already chained list of segments.
    #[must_use]
    pub fn new(segments: Vec<Line>) -> Self {
        Self { segments }
    }

    /// Returns the segments in traversal order.
    #[must_use]
    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the start point of every segment, in order.
    #[must_use]
    pub fn points(&self) -> Vec<Point3> {
        self.segments.iter().map(|s| *s.start()).collect()
    }

    /// Checks that segments chain head-to-tail and close on the first point.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return false;
        };
        let chained = self
            .segments
            .windows(2)
            .all(|w| (w[0].end() - w[1].start()).norm() <= tolerance);
        chained && (last.end() - first.start()).norm() <= tolerance
    }

    /// Signed enclosed area in the XY plane, positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points())
    }

    /// Unsigned enclosed area in the XY plane.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(size: f64) -> BoundaryCurveSequence {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
        ];
        let segments = (0..pts.len())
            .map(|i| Line::new(pts[i], pts[(i + 1) % pts.len()]).unwrap())
            .collect();
        BoundaryCurveSequence::new(segments)
    }

    #[test]
    fn square_is_closed_with_area() {
        let seq = square(3.0);
        assert_eq!(seq.len(), 4);
        assert!(seq.is_closed(1e-12));
        assert!((seq.area() - 9.0).abs() < 1e-12);
        assert!(seq.signed_area() > 0.0);
    }

    #[test]
    fn open_chain_is_not_closed() {
        let mut segments = square(1.0).segments().to_vec();
        segments.pop();
        assert!(!BoundaryCurveSequence::new(segments).is_closed(1e-12));
    }

    #[test]
    fn empty_sequence_is_not_closed() {
        let seq = BoundaryCurveSequence::default();
        assert!(seq.is_empty());
        assert!(!seq.is_closed(1.0));
    }
}
