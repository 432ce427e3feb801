use crate::error::{OperationError, Result, TopologyError};
use crate::geometry::surface::Plane;
use crate::math::polygon_2d::newell_normal;
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore, WireId};

/// Maximum distance of a wire vertex from the face plane.
const COPLANAR_TOLERANCE: f64 = 1e-7;

/// Creates a planar face from an outer wire and optional hole wires.
///
/// The plane normal follows the outer wire by the right-hand rule unless an
/// explicit plane is supplied with [`MakeFace::on_plane`].
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
    plane: Option<Plane>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
            plane: None,
        }
    }

    /// Uses `plane` instead of deriving one from the outer wire.
    ///
    /// Needed for wires whose vertices alone do not span the plane, such as
    /// a circle made of two arcs.
    #[must_use]
    pub fn on_plane(mut self, plane: Plane) -> Self {
        self.plane = Some(plane);
        self
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WireNotClosed` for an open wire,
    /// `OperationError::InvalidInput` if the wires are not coplanar, or a
    /// geometry error if no plane can be derived.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let mut wire_points = Vec::with_capacity(self.inner_wires.len() + 1);
        for wire in std::iter::once(self.outer_wire).chain(self.inner_wires.iter().copied()) {
            wire_points.push(wire_vertices(store, wire)?);
        }

        let plane = match &self.plane {
            Some(plane) => plane.clone(),
            None => Plane::from_normal(wire_points[0][0], newell_normal(&wire_points[0])?)?,
        };

        let off_plane = wire_points
            .iter()
            .flatten()
            .any(|p| plane.signed_distance(p).abs() > COPLANAR_TOLERANCE);
        if off_plane {
            return Err(OperationError::InvalidInput("face wires are not coplanar".into()).into());
        }

        Ok(store.add_face(FaceData {
            surface: FaceSurface::Plane(plane),
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense: true,
        }))
    }
}

/// Collects vertex positions of a closed wire in traversal order.
fn wire_vertices(store: &TopologyStore, wire_id: WireId) -> Result<Vec<Point3>> {
    let wire = store.wire(wire_id)?;
    if !wire.is_closed {
        return Err(TopologyError::WireNotClosed.into());
    }
    if wire.edges.is_empty() {
        return Err(OperationError::InvalidInput("face wire has no edges".into()).into());
    }
    let mut points = Vec::with_capacity(wire.edges.len());
    for oe in &wire.edges {
        let edge = store.edge(oe.edge)?;
        let vertex_id = if oe.forward { edge.start } else { edge.end };
        points.push(store.vertex(vertex_id)?.point);
    }
    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::creation::MakeWire;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(store: &mut TopologyStore, z: f64) -> WireId {
        MakeWire::new(
            vec![p(0.0, 0.0, z), p(4.0, 0.0, z), p(4.0, 4.0, z), p(0.0, 4.0, z)],
            true,
        )
        .execute(store)
        .unwrap()
    }

    fn normal_of(store: &TopologyStore, face: FaceId) -> Vector3 {
        let FaceSurface::Plane(plane) = &store.face(face).unwrap().surface else {
            panic!("expected a planar face");
        };
        *plane.plane_normal()
    }

    #[test]
    fn ccw_square_faces_up() {
        let mut store = TopologyStore::new();
        let wire = square(&mut store, 2.0);
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        assert!((normal_of(&store, face) - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn face_keeps_holes() {
        let mut store = TopologyStore::new();
        let outer = square(&mut store, 0.0);
        let hole = MakeWire::new(
            vec![p(1.0, 1.0, 0.0), p(1.0, 2.0, 0.0), p(2.0, 2.0, 0.0), p(2.0, 1.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(outer, vec![hole]).execute(&mut store).unwrap();
        assert_eq!(store.face(face).unwrap().inner_wires, vec![hole]);
    }

    #[test]
    fn hole_off_plane_rejected() {
        let mut store = TopologyStore::new();
        let outer = square(&mut store, 0.0);
        let hole = square(&mut store, 1.0);
        assert!(MakeFace::new(outer, vec![hole]).execute(&mut store).is_err());
    }

    #[test]
    fn open_wire_rejected() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)], false)
            .execute(&mut store)
            .unwrap();
        assert!(MakeFace::new(wire, vec![]).execute(&mut store).is_err());
    }

    #[test]
    fn explicit_plane_wins() {
        let mut store = TopologyStore::new();
        let wire = square(&mut store, 0.0);
        let plane = Plane::from_normal(Point3::origin(), -Vector3::z()).unwrap();
        let face = MakeFace::new(wire, vec![]).on_plane(plane).execute(&mut store).unwrap();
        assert!((normal_of(&store, face) + Vector3::z()).norm() < 1e-12);
    }
}
