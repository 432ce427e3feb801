pub mod clip;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{Result, SlabclipError};
pub use operations::top_face::TopFaceIntersect;
