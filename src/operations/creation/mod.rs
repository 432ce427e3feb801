mod make_element;
mod make_face;
mod make_round_slab;
mod make_slab;
mod make_solid;
mod make_wire;

pub use make_element::MakeElement;
pub use make_face::MakeFace;
pub use make_round_slab::MakeRoundSlab;
pub use make_slab::MakeSlab;
pub use make_solid::MakeSolid;
pub use make_wire::MakeWire;
