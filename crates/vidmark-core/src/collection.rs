//! Committed shape collection.

use crate::shapes::{Shape, ShapeId};

/// Ordered collection of committed shapes.
///
/// Insertion order is creation order; it doubles as the render z-order and
/// the order of the user-facing list. Committed shapes are reachable only by
/// shared reference and never change.
#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
}

impl ShapeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed shape.
    pub fn add(&mut self, shape: Shape) {
        debug_assert!(self.get(shape.id()).is_none(), "duplicate shape id");
        self.shapes.push(shape);
    }

    /// Remove a shape by id, preserving the relative order of the rest.
    pub fn remove_by_id(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    /// Remove the most recently committed shape.
    pub fn remove_last(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Iterate shapes in insertion order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
