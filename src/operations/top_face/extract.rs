use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::lattice::{Loop, PolygonSet, Quantizer};
use crate::math::{Vector3, TOLERANCE};
use crate::tessellation::TessellationParams;
use crate::topology::{ElementId, FaceClass, FaceId, GeometryAccess, NORMAL_TOLERANCE};

/// Collects the upward-facing planar boundary loops of an element on the lattice.
///
/// Every face whose outward normal matches `up` contributes all of its loops,
/// outer first. Faces from every solid of the element accumulate into one
/// even-odd set; non-solid pieces, curved faces and faces pointing any other
/// way are skipped.
pub struct ExtractTopLoops {
    element: ElementId,
    up: Vector3,
    params: TessellationParams,
    quantizer: Quantizer,
    normal_tolerance: f64,
}

impl ExtractTopLoops {
    /// Creates a new `ExtractTopLoops` operation looking along +Z.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
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

    /// Sets the quantizer mapping points onto the lattice.
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

    /// Executes the extraction.
    ///
    /// An element without any qualifying face yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero up direction,
    /// `TopologyError::EntityNotFound` for a dangling id, or a tessellation
    /// error for invalid parameters.
    pub fn execute(&self, geometry: &impl GeometryAccess) -> Result<PolygonSet> {
        if self.up.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        self.params.validate()?;

        let mut set = PolygonSet::new();
        for class in geometry.classify_faces(self.element, &self.up, self.normal_tolerance)? {
            match class {
                FaceClass::PlanarUpward(face) => self.collect_face(geometry, face, &mut set)?,
                FaceClass::PlanarOther(face) => trace!(?face, "skipping planar face not facing up"),
                FaceClass::NonPlanar(face) => trace!(?face, "skipping curved face"),
                FaceClass::NonSolidPiece => trace!("skipping non-solid piece"),
            }
        }
        Ok(set)
    }

    fn collect_face(
        &self,
        geometry: &impl GeometryAccess,
        face: FaceId,
        set: &mut PolygonSet,
    ) -> Result<()> {
        for edges in geometry.face_loops(face)? {
            let mut ring = Loop::default();
            for edge in edges {
                for p in geometry.tessellate_edge(edge, &self.params)? {
                    ring.push(self.quantizer.quantize(&p));
                }
            }
            ring.close();
            trace!(?face, points = ring.len(), "extracted loop");
            set.push(ring);
        }
        Ok(())
    }
}
