pub mod boundary;
pub mod curve;
pub mod surface;

pub use boundary::BoundaryCurveSequence;
pub use curve::{Arc, Curve, CurveDomain, Line};
pub use surface::{Cylinder, Plane};
