//! Plan-view intersection of element top faces.
//!
//! Top outlines are extracted onto an integer lattice, intersected there by a
//! [`PolygonClipper`](crate::clip::PolygonClipper), and rebuilt as closed
//! chains of straight segments.

mod extract;
mod intersect;
mod reconstruct;

pub use extract::ExtractTopLoops;
pub use intersect::TopFaceIntersect;
pub use reconstruct::reconstruct_loop;
