//! Read-only geometry queries the top-face extractor relies on.
//!
//! The extractor never walks the arena directly; it asks for classified
//! faces, face loops and edge tessellations through [`GeometryAccess`], so a
//! different host model only has to answer these three questions.

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::tessellation::{TessellateCurve, TessellationParams};

use super::{ElementId, FaceId, FaceSurface, GeometryPiece, OrientedEdge, TopologyStore};

/// Default tolerance for comparing a face normal against the up direction.
pub const NORMAL_TOLERANCE: f64 = 1e-9;

/// Classification of one entry of an element's geometry against an up direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceClass {
    /// A planar face whose outward normal equals the up direction.
    PlanarUpward(FaceId),
    /// A planar face facing any other way.
    PlanarOther(FaceId),
    /// A face on a curved surface.
    NonPlanar(FaceId),
    /// A geometry piece that is not a solid and has no faces.
    NonSolidPiece,
}

/// Capability queries over a host geometry model.
pub trait GeometryAccess {
    /// Classifies every face of every piece of `element`, in piece then face order.
    ///
    /// # Errors
    ///
    /// Returns an error if the element or one of its entities cannot be read.
    fn classify_faces(
        &self,
        element: ElementId,
        up: &Vector3,
        tolerance: f64,
    ) -> Result<Vec<FaceClass>>;

    /// Returns the boundary loops of `face` as oriented edges, outer loop first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its wires cannot be read.
    fn face_loops(&self, face: FaceId) -> Result<Vec<Vec<OrientedEdge>>>;

    /// Tessellates one oriented edge into points in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge cannot be read or tessellated.
    fn tessellate_edge(&self, edge: OrientedEdge, params: &TessellationParams)
        -> Result<Vec<Point3>>;
}

impl GeometryAccess for TopologyStore {
    fn classify_faces(
        &self,
        element: ElementId,
        up: &Vector3,
        tolerance: f64,
    ) -> Result<Vec<FaceClass>> {
        let up = up.normalize();
        let mut classes = Vec::new();

        for piece in &self.element(element)?.pieces {
            let GeometryPiece::Solid(solid_id) = piece else {
                classes.push(FaceClass::NonSolidPiece);
                continue;
            };
            for shell_id in self.solid(*solid_id)?.shells() {
                for &face_id in &self.shell(shell_id)?.faces {
                    let face = self.face(face_id)?;
                    let class = match &face.surface {
                        FaceSurface::Plane(plane) => {
                            let normal = if face.same_sense {
                                *plane.plane_normal()
                            } else {
                                -plane.plane_normal()
                            };
                            if is_almost_equal(&normal, &up, tolerance) {
                                FaceClass::PlanarUpward(face_id)
                            } else {
                                FaceClass::PlanarOther(face_id)
                            }
                        }
                        FaceSurface::Cylinder(_) => FaceClass::NonPlanar(face_id),
                    };
                    classes.push(class);
                }
            }
        }

        Ok(classes)
    }

    fn face_loops(&self, face: FaceId) -> Result<Vec<Vec<OrientedEdge>>> {
        let face = self.face(face)?;
        face.wires()
            .map(|wire_id| Ok(self.wire(wire_id)?.edges.clone()))
            .collect()
    }

    fn tessellate_edge(
        &self,
        edge: OrientedEdge,
        params: &TessellationParams,
    ) -> Result<Vec<Point3>> {
        Ok(TessellateCurve::new(edge, *params).execute(self)?.points)
    }
}

/// Component-wise comparison, matching how hosts test unit vectors for equality.
fn is_almost_equal(a: &Vector3, b: &Vector3, tolerance: f64) -> bool {
    (a - b).iter().all(|d| d.abs() <= tolerance)
}
