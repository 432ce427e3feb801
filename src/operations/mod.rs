pub mod creation;
pub mod top_face;
