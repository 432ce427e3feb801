use crate::error::{OperationError, Result};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point3, TOLERANCE};
use crate::topology::{FaceId, ShellData, SolidId, TopologyStore};

use super::{MakeFace, MakeSolid, MakeWire};

/// Creates a horizontal slab: a prism over a planar outline with optional holes.
///
/// The outline and holes are read in the XY plane (their z is ignored) and
/// the slab spans `base ..= base + thickness`. The outline is made
/// counter-clockwise and the holes clockwise, so the top face's outward
/// normal is +Z and every side face points out of the material.
pub struct MakeSlab {
    outline: Vec<Point3>,
    holes: Vec<Vec<Point3>>,
    base: f64,
    thickness: f64,
}

impl MakeSlab {
    /// Creates a new `MakeSlab` operation.
    #[must_use]
    pub fn new(outline: Vec<Point3>, base: f64, thickness: f64) -> Self {
        Self {
            outline,
            holes: Vec::new(),
            base,
            thickness,
        }
    }

    /// Adds an opening through the slab.
    #[must_use]
    pub fn with_hole(mut self, hole: Vec<Point3>) -> Self {
        self.holes.push(hole);
        self
    }

    /// Executes the operation, creating the slab solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the thickness is not positive
    /// or a profile loop encloses no area.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.thickness < TOLERANCE {
            return Err(
                OperationError::InvalidInput("slab thickness must be positive".into()).into(),
            );
        }

        let outline = oriented_profile(&self.outline, true)?;
        let holes = self
            .holes
            .iter()
            .map(|h| oriented_profile(h, false))
            .collect::<Result<Vec<_>>>()?;

        let top_z = self.base + self.thickness;
        let mut faces = Vec::new();

        // Top: outline as-is faces +Z.
        faces.push(planar_face(store, &at_z(&outline, top_z), &holes_at_z(&holes, top_z, false))?);
        // Bottom: every loop reversed faces -Z.
        faces.push(planar_face(
            store,
            &reversed(&at_z(&outline, self.base)),
            &holes_at_z(&holes, self.base, true),
        )?);

        for profile in std::iter::once(&outline).chain(holes.iter()) {
            let n = profile.len();
            for i in 0..n {
                let j = (i + 1) % n;
                let quad = [
                    Point3::new(profile[i].x, profile[i].y, self.base),
                    Point3::new(profile[j].x, profile[j].y, self.base),
                    Point3::new(profile[j].x, profile[j].y, top_z),
                    Point3::new(profile[i].x, profile[i].y, top_z),
                ];
                faces.push(planar_face(store, &quad, &[])?);
            }
        }

        let shell = store.add_shell(ShellData {
            faces,
            is_closed: true,
        });
        MakeSolid::new(shell, vec![]).execute(store)
    }
}

/// Returns the profile wound counter-clockwise (`ccw`) or clockwise.
fn oriented_profile(points: &[Point3], ccw: bool) -> Result<Vec<Point3>> {
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        return Err(OperationError::InvalidInput("slab profile encloses no area".into()).into());
    }
    Ok(if (area > 0.0) == ccw {
        points.to_vec()
    } else {
        reversed(points)
    })
}

fn at_z(points: &[Point3], z: f64) -> Vec<Point3> {
    points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
}

fn holes_at_z(holes: &[Vec<Point3>], z: f64, reverse: bool) -> Vec<Vec<Point3>> {
    holes
        .iter()
        .map(|h| {
            let lifted = at_z(h, z);
            if reverse {
                reversed(&lifted)
            } else {
                lifted
            }
        })
        .collect()
}

fn reversed(points: &[Point3]) -> Vec<Point3> {
    points.iter().rev().copied().collect()
}

fn planar_face(
    store: &mut TopologyStore,
    outer: &[Point3],
    holes: &[Vec<Point3>],
) -> Result<FaceId> {
    let outer_wire = MakeWire::new(outer.to_vec(), true).execute(store)?;
    let inner_wires = holes
        .iter()
        .map(|h| MakeWire::new(h.clone(), true).execute(store))
        .collect::<Result<Vec<_>>>()?;
    MakeFace::new(outer_wire, inner_wires).execute(store)
}
