use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::LatticePoint;

/// Grain units per source length unit: feet to millimetres.
pub const FEET_TO_MM: f64 = 25.4 * 12.0;

/// Source lengths smaller than this in magnitude quantize to exactly zero.
pub const ZERO_EPSILON: f64 = 1.0e-9;

/// Converts between continuous coordinates and the integer lattice.
///
/// Rounds half away from zero by adding (or subtracting) one half and
/// truncating. Values within `epsilon` of zero snap to zero before scaling so
/// floating noise around the origin cannot produce a stray grain unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    scale: f64,
    epsilon: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            scale: FEET_TO_MM,
            epsilon: ZERO_EPSILON,
        }
    }
}

impl Quantizer {
    /// Creates a quantizer with a custom scale and zero-snap epsilon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidParameter` if `scale` is not a positive
    /// finite number, its grain is not coarser than [`TOLERANCE`], or
    /// `epsilon` is negative or not finite.
    pub fn new(scale: f64, epsilon: f64) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GeometryError::InvalidParameter {
                parameter: "scale",
                value: scale,
                reason: "must be positive and finite",
            }
            .into());
        }
        if 1.0 / scale <= TOLERANCE {
            return Err(GeometryError::InvalidParameter {
                parameter: "scale",
                value: scale,
                reason: "grain must be coarser than the geometric tolerance",
            }
            .into());
        }
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(GeometryError::InvalidParameter {
                parameter: "epsilon",
                value: epsilon,
                reason: "must be non-negative and finite",
            }
            .into());
        }
        Ok(Self { scale, epsilon })
    }

    /// Returns the scale factor (grain units per source unit).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the zero-snap epsilon in source units.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the size of one grain unit in source units.
    #[must_use]
    pub fn grain(&self) -> f64 {
        1.0 / self.scale
    }

    /// Quantizes one source length to grain units.
    ///
    /// Out-of-range magnitudes saturate at `i64::MIN`/`i64::MAX`; `NaN` maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn quantize_length(&self, d: f64) -> i64 {
        if d.abs() < self.epsilon {
            return 0;
        }
        if d > 0.0 {
            (self.scale * d + 0.5) as i64
        } else {
            (self.scale * d - 0.5) as i64
        }
    }

    /// Converts grain units back to a source length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dequantize_length(&self, d: i64) -> f64 {
        d as f64 / self.scale
    }

    /// Quantizes the XY components of a point; z is dropped.
    #[must_use]
    pub fn quantize(&self, p: &Point3) -> LatticePoint {
        LatticePoint::new(self.quantize_length(p.x), self.quantize_length(p.y))
    }

    /// Converts a lattice point back to a continuous point at zero elevation.
    #[must_use]
    pub fn dequantize(&self, p: LatticePoint) -> Point3 {
        Point3::new(self.dequantize_length(p.x), self.dequantize_length(p.y), 0.0)
    }
}
