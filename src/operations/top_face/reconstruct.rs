use crate::error::Result;
use crate::geometry::curve::Line;
use crate::geometry::BoundaryCurveSequence;
use crate::lattice::{Loop, Quantizer};

/// Rebuilds a closed chain of straight segments from one lattice loop.
///
/// Points are dequantized at zero elevation. Consecutive equal points are
/// merged and a closing segment joins the last point to the first. Returns
/// `Ok(None)` when fewer than two distinct points remain.
///
/// # Errors
///
/// Returns a geometry error if two distinct lattice points dequantize to
/// points closer than the geometric tolerance.
pub fn reconstruct_loop(
    ring: &Loop,
    quantizer: &Quantizer,
) -> Result<Option<BoundaryCurveSequence>> {
    let mut points = ring.points().to_vec();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 2 {
        return Ok(None);
    }

    let points: Vec<_> = points.into_iter().map(|p| quantizer.dequantize(p)).collect();
    let segments = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| Line::new(*a, *b))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(BoundaryCurveSequence::new(segments)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lattice::LatticePoint;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    fn unit() -> Quantizer {
        Quantizer::new(1.0, 1e-9).unwrap()
    }

    #[test]
    fn square_closes_back_to_start() {
        let ring = Loop::new([
            LatticePoint::new(0, 0),
            LatticePoint::new(4, 0),
            LatticePoint::new(4, 4),
            LatticePoint::new(0, 4),
        ]);
        let seq = reconstruct_loop(&ring, &unit()).unwrap().unwrap();
        assert_eq!(seq.len(), 4);
        assert!(seq.is_closed(1e-12));
        assert_relative_eq!(seq.signed_area(), 16.0);
        assert_eq!(*seq.segments()[3].end(), Point3::origin());
    }

    #[test]
    fn points_are_dequantized() {
        let ring = Loop::new([
            LatticePoint::new(3048, 0),
            LatticePoint::new(6096, 0),
            LatticePoint::new(6096, 3048),
        ]);
        let seq = reconstruct_loop(&ring, &Quantizer::default()).unwrap().unwrap();
        let start = seq.segments()[0].start();
        assert_relative_eq!(start.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(start.z, 0.0);
    }

    #[test]
    fn two_points_give_a_there_and_back_pair() {
        let ring = Loop::new([LatticePoint::new(0, 0), LatticePoint::new(1, 0)]);
        let seq = reconstruct_loop(&ring, &unit()).unwrap().unwrap();
        assert_eq!(seq.len(), 2);
        assert!(seq.is_closed(1e-12));
    }

    #[test]
    fn single_point_gives_nothing() {
        let ring = Loop::new([LatticePoint::new(7, 7), LatticePoint::new(7, 7)]);
        assert!(reconstruct_loop(&ring, &unit()).unwrap().is_none());
        assert!(reconstruct_loop(&Loop::default(), &unit()).unwrap().is_none());
    }

    #[test]
    fn one_grain_edge_under_finest_quantizer_stays_closed() {
        let fine = Quantizer::new(1.0e9, 1e-12).unwrap();
        let ring = Loop::new([
            LatticePoint::new(0, 0),
            LatticePoint::new(1, 0),
            LatticePoint::new(1000, 1000),
            LatticePoint::new(0, 1000),
        ]);
        let seq = reconstruct_loop(&ring, &fine).unwrap().unwrap();
        assert_eq!(seq.len(), 4);
        assert!(seq.is_closed(1e-15));
        assert_relative_eq!(seq.segments()[0].length(), fine.grain(), max_relative = 1e-9);
    }
}
