use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A circular arc in 3D space.
///
/// Sweeps counter-clockwise around `normal` from `start_angle` to
/// `end_angle` (radians), measured from `ref_dir`.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the arc plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the swept angle in radians (signed).
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.normal.cross(&self.ref_dir);
        Ok(self.center
            + self.ref_dir * (self.radius * t.cos())
            + binormal * (self.radius * t.sin()))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quarter(radius: f64) -> Arc {
        Arc::new(Point3::origin(), radius, Vector3::z(), Vector3::x(), 0.0, FRAC_PI_2).unwrap()
    }

    #[test]
    fn endpoints_of_quarter_arc() {
        let arc = quarter(2.0);
        let d = arc.domain();
        let a = arc.evaluate(d.t_min).unwrap();
        let b = arc.evaluate(d.t_max).unwrap();
        assert!((a - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((b - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn half_arc_sweep() {
        let arc = Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 0.0, PI).unwrap();
        assert!((arc.sweep() - PI).abs() < TOLERANCE);
    }

    #[test]
    fn invalid_radius() {
        let r = Arc::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x(), 0.0, PI);
        assert!(r.is_err());
    }

    #[test]
    fn non_perpendicular_reference_rejected() {
        let r = Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::new(1.0, 0.0, 1.0), 0.0, PI);
        assert!(r.is_err());
    }
}
