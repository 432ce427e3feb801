use super::{Point3, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The closing edge
/// from the last point back to the first is implied.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the unit normal of a closed polygon using Newell's method.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the polygon encloses no area.
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate("polygon has no normal".into()).into());
    }
    Ok(normal / len)
}

/// Rotates a closed ring so it starts at its smallest element.
///
/// With lexicographically ordered points this is the leftmost vertex,
/// ties broken by smallest y. Keeps loop comparisons deterministic.
#[must_use]
pub fn rotate_to_canonical_start<T: Copy + Ord>(points: &[T]) -> Vec<T> {
    let Some(best) = points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| **p)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
