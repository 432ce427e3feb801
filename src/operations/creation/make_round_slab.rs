use std::f64::consts::{PI, TAU};

use crate::error::{OperationError, Result};
use crate::geometry::curve::{Arc, Line};
use crate::geometry::surface::{Cylinder, Plane};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, FaceData, FaceSurface, OrientedEdge, ShellData, SolidId,
    TopologyStore, VertexData, VertexId, WireData,
};

use super::{MakeFace, MakeSolid};

/// Creates a circular slab: a vertical cylinder with flat top and bottom.
///
/// Each cap is bounded by two half-circle arcs joined at angle 0 and pi,
/// and the side is a single cylindrical face closed by a vertical seam line.
pub struct MakeRoundSlab {
    center: Point3,
    radius: f64,
    base: f64,
    thickness: f64,
}

/// The two half-circle edges of one cap, counter-clockwise seen from +Z.
struct CircleEdges {
    seam: VertexId,
    first: EdgeId,
    second: EdgeId,
}

impl MakeRoundSlab {
    /// Creates a new `MakeRoundSlab` operation.
    ///
    /// Only `center.x` and `center.y` are used; the slab spans
    /// `base ..= base + thickness`.
    #[must_use]
    pub fn new(center: Point3, radius: f64, base: f64, thickness: f64) -> Self {
        Self {
            center,
            radius,
            base,
            thickness,
        }
    }

    /// Executes the operation, creating the slab solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the thickness is not positive,
    /// or a geometry error if the radius is not positive.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.thickness < TOLERANCE {
            return Err(
                OperationError::InvalidInput("slab thickness must be positive".into()).into(),
            );
        }

        let top_z = self.base + self.thickness;
        let bottom_center = Point3::new(self.center.x, self.center.y, self.base);
        let top_center = Point3::new(self.center.x, self.center.y, top_z);

        let bottom = self.circle(store, bottom_center)?;
        let top = self.circle(store, top_center)?;

        let top_wire = store.add_wire(WireData {
            edges: vec![
                OrientedEdge::new(top.first, true),
                OrientedEdge::new(top.second, true),
            ],
            is_closed: true,
        });
        let top_face = MakeFace::new(top_wire, vec![])
            .on_plane(Plane::from_normal(top_center, Vector3::z())?)
            .execute(store)?;

        let bottom_wire = store.add_wire(WireData {
            edges: vec![
                OrientedEdge::new(bottom.second, false),
                OrientedEdge::new(bottom.first, false),
            ],
            is_closed: true,
        });
        let bottom_face = MakeFace::new(bottom_wire, vec![])
            .on_plane(Plane::from_normal(bottom_center, -Vector3::z())?)
            .execute(store)?;

        let seam_line = Line::new(
            store.vertex(bottom.seam)?.point,
            store.vertex(top.seam)?.point,
        )?;
        let seam = store.add_edge(EdgeData {
            start: bottom.seam,
            end: top.seam,
            curve: EdgeCurve::Line(seam_line),
            t_start: 0.0,
            t_end: 1.0,
        });
        let side_wire = store.add_wire(WireData {
            edges: vec![
                OrientedEdge::new(bottom.first, true),
                OrientedEdge::new(bottom.second, true),
                OrientedEdge::new(seam, true),
                OrientedEdge::new(top.second, false),
                OrientedEdge::new(top.first, false),
                OrientedEdge::new(seam, false),
            ],
            is_closed: true,
        });
        let side = Cylinder::new(bottom_center, self.radius, Vector3::z())?;
        let side_face = store.add_face(FaceData {
            surface: FaceSurface::Cylinder(side),
            outer_wire: side_wire,
            inner_wires: vec![],
            same_sense: true,
        });

        let shell = store.add_shell(ShellData {
            faces: vec![top_face, bottom_face, side_face],
            is_closed: true,
        });
        MakeSolid::new(shell, vec![]).execute(store)
    }

    fn circle(&self, store: &mut TopologyStore, center: Point3) -> Result<CircleEdges> {
        let first_arc = Arc::new(center, self.radius, Vector3::z(), Vector3::x(), 0.0, PI)?;
        let second_arc = Arc::new(center, self.radius, Vector3::z(), Vector3::x(), PI, TAU)?;

        let seam = store.add_vertex(VertexData::new(center + Vector3::x() * self.radius));
        let opposite = store.add_vertex(VertexData::new(center - Vector3::x() * self.radius));

        let first = store.add_edge(EdgeData {
            start: seam,
            end: opposite,
            curve: EdgeCurve::Arc(first_arc),
            t_start: 0.0,
            t_end: PI,
        });
        let second = store.add_edge(EdgeData {
            start: opposite,
            end: seam,
            curve: EdgeCurve::Arc(second_arc),
            t_start: PI,
            t_end: TAU,
        });
        Ok(CircleEdges {
            seam,
            first,
            second,
        })
    }
}
