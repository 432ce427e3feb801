mod tessellate_curve;

pub use tessellate_curve::TessellateCurve;

use crate::error::{Result, TessellationError};
use crate::math::Point3;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed chord deviation from the true curve.
    pub tolerance: f64,
    /// Minimum number of segments for curved edges.
    pub min_segments: usize,
    /// Maximum number of segments for curved edges.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

impl TessellationParams {
    /// Checks that the parameters describe a usable tessellation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if the tolerance is not
    /// a positive finite number or the segment bounds are empty or inverted.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(TessellationError::InvalidParameters(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment bounds {}..={} are invalid",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}
