use crate::error::Result;
use crate::topology::{EdgeCurve, OrientedEdge, TopologyStore};

use super::{Polyline, TessellationParams};

/// Tessellates an oriented edge into a polyline.
///
/// The polyline runs in traversal direction and includes both end points.
/// Straight edges yield their two vertices; arcs are sampled so the chord
/// deviation stays within the tolerance.
pub struct TessellateCurve {
    edge: OrientedEdge,
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(edge: OrientedEdge, params: TessellationParams) -> Self {
        Self { edge, params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing from the store or the
    /// tessellation parameters are invalid.
    pub fn execute(&self, store: &TopologyStore) -> Result<Polyline> {
        self.params.validate()?;
        let edge = store.edge(self.edge.edge)?;
        let (t_start, t_end) = if self.edge.forward {
            (edge.t_start, edge.t_end)
        } else {
            (edge.t_end, edge.t_start)
        };

        let segments = match &edge.curve {
            EdgeCurve::Line(_) => 1,
            EdgeCurve::Arc(arc) => arc_segments(arc.radius(), t_end - t_start, &self.params),
        };

        let curve = edge.curve.as_curve();
        let mut points = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            #[allow(clippy::cast_precision_loss)]
            let frac = i as f64 / segments as f64;
            points.push(curve.evaluate(t_start + frac * (t_end - t_start))?);
        }

        Ok(Polyline { points })
    }
}

/// Computes the number of segments for an arc based on chord error.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn arc_segments(radius: f64, sweep: f64, params: &TessellationParams) -> usize {
    if radius > params.tolerance {
        let half_angle = (1.0 - params.tolerance / radius).acos();
        let computed = (sweep.abs() / (2.0 * half_angle)).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}
