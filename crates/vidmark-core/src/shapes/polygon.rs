//! Polygon region.

use super::{ShapeColor, ShapeId};
use kurbo::Point;

/// A closed polygonal region with vertices in click order.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices in click order, in source coordinates.
    pub vertices: Vec<Point>,
    /// Display color assigned at creation.
    pub color: ShapeColor,
    /// Human-readable name.
    pub label: String,
}

impl Polygon {
    /// Minimum number of vertices for a committable polygon.
    pub const MIN_VERTICES: usize = 3;

    /// Start a polygon at its first vertex.
    pub(crate) fn begin(id: ShapeId, first: Point, color: ShapeColor, label: String) -> Self {
        Self {
            id,
            vertices: vec![first],
            color,
            label,
        }
    }

    /// Append a vertex.
    pub(crate) fn push_vertex(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Ordered vertices as stored.
    pub fn points(&self) -> Vec<Point> {
        self.vertices.clone()
    }
}
