use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use tracing::trace;

use crate::error::{ClipError, Result};
use crate::lattice::{FillRule, LatticePoint, Loop, PolygonSet};
use crate::math::polygon_2d::rotate_to_canonical_start;

use super::PolygonClipper;

/// Largest lattice magnitude that converts to `f64` without loss.
const MAX_EXACT: i64 = 1 << 53;

/// Intersection engine backed by `geo`'s boolean operations.
///
/// Each operand's even-odd region is built by XOR-ing its loops together:
/// a point covered by an odd number of loops survives, an even number
/// cancels. The two regions are then intersected and the result rings are
/// rounded back onto the lattice.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoClipper;

impl GeoClipper {
    /// Creates a new engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolygonClipper for GeoClipper {
    fn intersect(&self, subject: &PolygonSet, clip: &PolygonSet) -> Result<PolygonSet> {
        let subject_region = even_odd_region(subject)?;
        let clip_region = even_odd_region(clip)?;
        if subject_region.0.is_empty() || clip_region.0.is_empty() {
            return Ok(PolygonSet::new());
        }

        let result = subject_region.intersection(&clip_region);
        let mut out = PolygonSet::new();
        for polygon in &result {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                if let Some(ring) = ring_to_loop(ring) {
                    out.push(ring);
                }
            }
        }
        trace!(
            subject = subject.len(),
            clip = clip.len(),
            result = out.len(),
            "geo intersection"
        );
        Ok(out)
    }
}

/// Resolves a loop set into the region it fills under the even-odd rule.
fn even_odd_region(set: &PolygonSet) -> Result<MultiPolygon<f64>> {
    if set.fill_rule() != FillRule::EvenOdd {
        return Err(ClipError::UnsupportedFillRule(set.fill_rule()).into());
    }

    let mut region = MultiPolygon::new(Vec::new());
    for ring in set {
        if ring.len() < 3 {
            continue;
        }
        let coords = ring
            .points()
            .iter()
            .map(|p| Ok(Coord { x: to_f64(p.x)?, y: to_f64(p.y)? }))
            .collect::<Result<Vec<_>>>()?;
        let polygon = MultiPolygon::new(vec![Polygon::new(LineString::new(coords), Vec::new())]);
        region = if region.0.is_empty() {
            polygon
        } else {
            region.xor(&polygon)
        };
    }
    Ok(region)
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(v: i64) -> Result<f64> {
    if v.unsigned_abs() > MAX_EXACT.unsigned_abs() {
        return Err(ClipError::CoordinateOutOfRange(v).into());
    }
    Ok(v as f64)
}

/// Rounds a closed `geo` ring back onto the lattice, starting at its
/// smallest point.
///
/// Returns `None` if fewer than three distinct points remain.
#[allow(clippy::cast_possible_truncation)]
fn ring_to_loop(ring: &LineString<f64>) -> Option<Loop> {
    let ring = Loop::new(
        ring.0
            .iter()
            .map(|c| LatticePoint::new(c.x.round() as i64, c.y.round() as i64)),
    );
    (ring.len() >= 3).then(|| Loop::new(rotate_to_canonical_start(ring.points())))
}
