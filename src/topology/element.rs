use super::edge::EdgeId;
use super::solid::SolidId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a host element (e.g. a floor slab).
    pub struct ElementId;
}

/// One geometric piece of an element.
///
/// Elements may carry auxiliary non-solid geometry next to their solids.
#[derive(Debug, Clone, Copy)]
pub enum GeometryPiece {
    /// A solid volume.
    Solid(SolidId),
    /// A loose curve, such as a reference or sketch line.
    Curve(EdgeId),
    /// A loose point.
    Point(VertexId),
}

/// A host object owning an ordered list of geometry pieces.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Pieces in the order the host reports them.
    pub pieces: Vec<GeometryPiece>,
}
