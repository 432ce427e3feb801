use tracing::debug;

use crate::clip::{GeoClipper, PolygonClipper};
use crate::error::Result;
use crate::geometry::BoundaryCurveSequence;
use crate::lattice::Quantizer;
use crate::math::Vector3;
use crate::tessellation::TessellationParams;
use crate::topology::{ElementId, GeometryAccess, NORMAL_TOLERANCE};

use super::extract::ExtractTopLoops;
use super::reconstruct::reconstruct_loop;

/// Intersects the top faces of two elements in plan view.
///
/// The eave element is the subject and the boundary element the clip. The
/// result is one closed segment chain per output loop, at zero elevation.
pub struct TopFaceIntersect {
    eave: ElementId,
    boundary: ElementId,
    up: Vector3,
    params: TessellationParams,
    quantizer: Quantizer,
    normal_tolerance: f64,
}

impl TopFaceIntersect {
    /// Creates a new `TopFaceIntersect` operation looking along +Z.
    #[must_use]
    pub fn new(eave: ElementId, boundary: ElementId) -> Self {
        Self {
            eave,
            boundary,
            up: Vector3::z(),
            params: TessellationParams::default(),
            quantizer: Quantizer::default(),
            normal_tolerance: NORMAL_TOLERANCE,
        }
    }

    /// Sets the direction a face must point to count as a top face.
    #[must_use]
    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up;
        self
    }

    /// Sets the tessellation parameters used for curved edges.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the quantizer shared by extraction and reconstruction.
    #[must_use]
    pub fn with_quantizer(mut self, quantizer: Quantizer) -> Self {
        self.quantizer = quantizer;
        self
    }

    /// Sets the tolerance for comparing face normals with the up direction.
    #[must_use]
    pub fn with_normal_tolerance(mut self, tolerance: f64) -> Self {
        self.normal_tolerance = tolerance;
        self
    }

    /// Executes the intersection with the default [`GeoClipper`] engine.
    ///
    /// # Errors
    ///
    /// Returns an error if either element cannot be read or the engine
    /// rejects the input.
    pub fn execute(&self, geometry: &impl GeometryAccess) -> Result<Vec<BoundaryCurveSequence>> {
        self.execute_with(geometry, &GeoClipper::new())
    }

    /// Executes the intersection with a caller-supplied engine.
    ///
    /// # Errors
    ///
    /// Returns an error if either element cannot be read or the engine
    /// rejects the input.
    pub fn execute_with(
        &self,
        geometry: &impl GeometryAccess,
        clipper: &impl PolygonClipper,
    ) -> Result<Vec<BoundaryCurveSequence>> {
        // Step 1: extract both top outlines
        let subject = self.extractor(self.eave).execute(geometry)?;
        let clip = self.extractor(self.boundary).execute(geometry)?;

        // Step 2: empty or bounds-disjoint early-out
        let (Some(subject_bounds), Some(clip_bounds)) = (subject.bounds(), clip.bounds()) else {
            debug!(
                subject = subject.len(),
                clip = clip.len(),
                "no top face to intersect"
            );
            return Ok(Vec::new());
        };
        if !subject_bounds.overlaps(&clip_bounds) {
            debug!(
                subject = subject.len(),
                clip = clip.len(),
                "top faces are disjoint"
            );
            return Ok(Vec::new());
        }

        // Step 3: intersect on the lattice
        let result = clipper.intersect(&subject, &clip)?;

        // Step 4: rebuild segment chains in engine order
        let mut sequences = Vec::with_capacity(result.len());
        for ring in &result {
            if let Some(sequence) = reconstruct_loop(ring, &self.quantizer)? {
                sequences.push(sequence);
            }
        }

        debug!(
            subject = subject.len(),
            clip = clip.len(),
            result = sequences.len(),
            "top face intersection"
        );
        Ok(sequences)
    }

    fn extractor(&self, element: ElementId) -> ExtractTopLoops {
        ExtractTopLoops::new(element)
            .with_up(self.up)
            .with_params(self.params)
            .with_quantizer(self.quantizer)
            .with_normal_tolerance(self.normal_tolerance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::f64::consts::PI;

    use super::*;
    use crate::lattice::PolygonSet;
    use crate::math::Point3;
    use crate::operations::creation::{MakeElement, MakeRoundSlab, MakeSlab, MakeWire};
    use crate::topology::{GeometryPiece, TopologyStore};
    use approx::assert_relative_eq;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square(x: f64, y: f64, size: f64) -> Vec<Point3> {
        vec![p(x, y), p(x + size, y), p(x + size, y + size), p(x, y + size)]
    }

    fn element(store: &mut TopologyStore, slab: MakeSlab) -> ElementId {
        let solid = slab.execute(store).unwrap();
        MakeElement::new(vec![GeometryPiece::Solid(solid)])
            .execute(store)
            .unwrap()
    }

    fn areas(result: &[BoundaryCurveSequence]) -> Vec<f64> {
        let mut areas: Vec<f64> = result.iter().map(BoundaryCurveSequence::area).collect();
        areas.sort_by(f64::total_cmp);
        areas
    }

    /// Counts engine calls and delegates to the default engine.
    struct CountingClipper {
        calls: Cell<usize>,
    }

    impl PolygonClipper for CountingClipper {
        fn intersect(&self, subject: &PolygonSet, clip: &PolygonSet) -> Result<PolygonSet> {
            self.calls.set(self.calls.get() + 1);
            GeoClipper::new().intersect(subject, clip)
        }
    }

    #[test]
    fn overlapping_squares_give_the_shared_square() {
        init_tracing();
        let mut store = TopologyStore::new();
        let eave = element(&mut store, MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0));
        let boundary = element(&mut store, MakeSlab::new(square(5.0, 5.0, 10.0), 0.0, 1.0));

        let result = TopFaceIntersect::new(eave, boundary).execute(&store).unwrap();
        assert_eq!(result.len(), 1);

        let q = Quantizer::default();
        let seq = &result[0];
        assert!(seq.is_closed(1e-12));
        assert_relative_eq!(seq.area(), 25.0, epsilon = 4.0 * q.grain());

        let corners = [p(5.0, 5.0), p(10.0, 5.0), p(10.0, 10.0), p(5.0, 10.0)];
        let points = seq.points();
        for corner in &corners {
            assert!(
                points.iter().any(|pt| (pt - corner).norm() <= q.grain()),
                "corner {corner:?} missing from {points:?}"
            );
        }
        for pt in &points {
            assert!(corners.iter().any(|c| (pt - c).norm() <= q.grain()));
            assert_relative_eq!(pt.z, 0.0);
        }
    }

    #[test]
    fn raised_slabs_come_back_at_zero_elevation() {
        let mut store = TopologyStore::new();
        let eave = element(&mut store, MakeSlab::new(square(0.0, 0.0, 4.0), 12.0, 0.5));
        let boundary = element(&mut store, MakeSlab::new(square(2.0, 0.0, 4.0), 3.0, 1.0));
        let result = TopFaceIntersect::new(eave, boundary).execute(&store).unwrap();
        assert_eq!(result.len(), 1);
        for seg in result[0].segments() {
            assert_relative_eq!(seg.start().z, 0.0);
            assert_relative_eq!(seg.end().z, 0.0);
        }
    }

    #[test]
    fn disjoint_slabs_skip_the_engine() {
        let mut store = TopologyStore::new();
        let eave = element(&mut store, MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0));
        let boundary = element(&mut store, MakeSlab::new(square(20.0, 20.0, 10.0), 0.0, 1.0));
        let clipper = CountingClipper { calls: Cell::new(0) };

        let result = TopFaceIntersect::new(eave, boundary)
            .execute_with(&store, &clipper)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(clipper.calls.get(), 0);
    }

    #[test]
    fn overlapping_bounds_without_overlap_is_empty() {
        // An L and a square in its notch share bounds but no area.
        let mut store = TopologyStore::new();
        let l_shape = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 4.0),
            p(4.0, 4.0),
            p(4.0, 10.0),
            p(0.0, 10.0),
        ];
        let eave = element(&mut store, MakeSlab::new(l_shape, 0.0, 1.0));
        let boundary = element(&mut store, MakeSlab::new(square(6.0, 6.0, 3.0), 0.0, 1.0));
        let clipper = CountingClipper { calls: Cell::new(0) };

        let result = TopFaceIntersect::new(eave, boundary)
            .execute_with(&store, &clipper)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(clipper.calls.get(), 1);
    }

    #[test]
    fn hole_survives_the_intersection() {
        let mut store = TopologyStore::new();
        let eave = element(
            &mut store,
            MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0).with_hole(square(4.0, 4.0, 2.0)),
        );
        let boundary = element(&mut store, MakeSlab::new(square(-5.0, -5.0, 20.0), 0.0, 1.0));

        let result = TopFaceIntersect::new(eave, boundary).execute(&store).unwrap();
        assert_eq!(result.len(), 2);

        let grain = Quantizer::default().grain();
        let areas = areas(&result);
        assert_relative_eq!(areas[0], 4.0, epsilon = 40.0 * grain);
        assert_relative_eq!(areas[1], 100.0, epsilon = 40.0 * grain);
        assert_relative_eq!(areas[1] - areas[0], 96.0, epsilon = 80.0 * grain);
    }

    #[test]
    fn intersecting_an_element_with_itself_keeps_its_outline() {
        let mut store = TopologyStore::new();
        let l_shape = vec![
            p(0.0, 0.0),
            p(8.0, 0.0),
            p(8.0, 4.0),
            p(4.0, 4.0),
            p(4.0, 8.0),
            p(0.0, 8.0),
        ];
        let slab = element(&mut store, MakeSlab::new(l_shape, 0.0, 1.0));
        let result = TopFaceIntersect::new(slab, slab)
            .with_quantizer(Quantizer::new(1.0, 1e-9).unwrap())
            .execute(&store)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 48.0);
    }

    #[test]
    fn element_without_solids_gives_nothing() {
        let mut store = TopologyStore::new();
        let slab = element(&mut store, MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0));
        let wire = MakeWire::new(vec![p(0.0, 0.0), p(5.0, 5.0)], false)
            .execute(&mut store)
            .unwrap();
        let edge = store.wire(wire).unwrap().edges[0].edge;
        let sketch = MakeElement::new(vec![GeometryPiece::Curve(edge)])
            .execute(&mut store)
            .unwrap();
        let clipper = CountingClipper { calls: Cell::new(0) };

        assert!(TopFaceIntersect::new(slab, sketch)
            .execute_with(&store, &clipper)
            .unwrap()
            .is_empty());
        assert!(TopFaceIntersect::new(sketch, slab)
            .execute_with(&store, &clipper)
            .unwrap()
            .is_empty());
        assert_eq!(clipper.calls.get(), 0);
    }

    #[test]
    fn round_slab_area_approaches_the_disc() {
        init_tracing();
        let mut store = TopologyStore::new();
        let disc = MakeRoundSlab::new(Point3::origin(), 10.0, 0.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let eave = MakeElement::new(vec![GeometryPiece::Solid(disc)])
            .execute(&mut store)
            .unwrap();
        let boundary = element(&mut store, MakeSlab::new(square(-20.0, -20.0, 40.0), 0.0, 1.0));

        let result = TopFaceIntersect::new(eave, boundary).execute(&store).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_closed(1e-12));
        assert_relative_eq!(result[0].area(), PI * 100.0, max_relative = 0.01);
    }

    #[test]
    fn half_disc_is_cut_by_a_straight_boundary() {
        let mut store = TopologyStore::new();
        let disc = MakeRoundSlab::new(Point3::origin(), 10.0, 0.0, 1.0)
            .execute(&mut store)
            .unwrap();
        let eave = MakeElement::new(vec![GeometryPiece::Solid(disc)])
            .execute(&mut store)
            .unwrap();
        let right_half = vec![p(0.0, -20.0), p(20.0, -20.0), p(20.0, 20.0), p(0.0, 20.0)];
        let boundary = element(&mut store, MakeSlab::new(right_half, 0.0, 1.0));

        let result = TopFaceIntersect::new(eave, boundary).execute(&store).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), PI * 50.0, max_relative = 0.01);
    }

    #[test]
    fn downward_view_matches_bottom_faces() {
        let mut store = TopologyStore::new();
        let eave = element(&mut store, MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0));
        let boundary = element(&mut store, MakeSlab::new(square(5.0, 5.0, 10.0), 0.0, 1.0));
        let result = TopFaceIntersect::new(eave, boundary)
            .with_up(-Vector3::z())
            .with_quantizer(Quantizer::new(1.0, 1e-9).unwrap())
            .execute(&store)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].area(), 25.0);
    }

    #[test]
    fn missing_element_is_an_error() {
        let mut store = TopologyStore::new();
        let slab = element(&mut store, MakeSlab::new(square(0.0, 0.0, 10.0), 0.0, 1.0));
        let mut other = TopologyStore::new();
        let _ = MakeElement::new(vec![]).execute(&mut other).unwrap();
        let stranger = MakeElement::new(vec![]).execute(&mut other).unwrap();
        assert!(TopFaceIntersect::new(slab, stranger).execute(&store).is_err());
    }
}
