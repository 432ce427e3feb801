use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded straight segment between two points.
///
/// The parametric form is: `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Point3,
    end: Point3,
}

impl Line {
    /// Creates a new bounded line between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.start + self.direction() * t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }
}
