use crate::error::Result;
use crate::topology::{ElementData, ElementId, GeometryPiece, TopologyStore};

/// Creates an element owning an ordered list of geometry pieces.
pub struct MakeElement {
    pieces: Vec<GeometryPiece>,
}

impl MakeElement {
    /// Creates a new `MakeElement` operation.
    #[must_use]
    pub fn new(pieces: Vec<GeometryPiece>) -> Self {
        Self { pieces }
    }

    /// Executes the operation, creating the element in the topology store.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if a piece refers to a missing entity.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<ElementId> {
        for piece in &self.pieces {
            match *piece {
                GeometryPiece::Solid(id) => {
                    store.solid(id)?;
                }
                GeometryPiece::Curve(id) => {
                    store.edge(id)?;
                }
                GeometryPiece::Point(id) => {
                    store.vertex(id)?;
                }
            }
        }
        Ok(store.add_element(ElementData {
            pieces: self.pieces.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::topology::VertexData;

    #[test]
    fn keeps_piece_order() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(Point3::origin()));
        let b = store.add_vertex(VertexData::new(Point3::new(1.0, 0.0, 0.0)));
        let element = MakeElement::new(vec![GeometryPiece::Point(a), GeometryPiece::Point(b)])
            .execute(&mut store)
            .unwrap();
        let pieces = &store.element(element).unwrap().pieces;
        assert!(matches!(pieces[0], GeometryPiece::Point(id) if id == a));
        assert!(matches!(pieces[1], GeometryPiece::Point(id) if id == b));
    }

    #[test]
    fn empty_element_is_allowed() {
        let mut store = TopologyStore::new();
        let element = MakeElement::new(vec![]).execute(&mut store).unwrap();
        assert!(store.element(element).unwrap().pieces.is_empty());
    }

    #[test]
    fn dangling_piece_rejected() {
        let mut other = TopologyStore::new();
        let v = other.add_vertex(VertexData::new(Point3::origin()));
        let mut store = TopologyStore::new();
        assert!(MakeElement::new(vec![GeometryPiece::Point(v)])
            .execute(&mut store)
            .is_err());
    }
}
