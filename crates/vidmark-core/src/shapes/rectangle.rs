//! Rectangle region.

use super::{ShapeColor, ShapeId};
use kurbo::{Point, Rect};

/// An axis-aligned rectangular region spanning two opposite corners.
///
/// Corners are stored in drag order, so the spanned box may run in a
/// "negative" direction; normalization happens only at render time, never
/// in storage.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// First corner (the press point), in source coordinates.
    pub anchor: Point,
    /// Opposite corner, absent until the drag produces one.
    pub corner: Option<Point>,
    /// Display color assigned at creation.
    pub color: ShapeColor,
    /// Human-readable name.
    pub label: String,
}

impl Rectangle {
    /// Start a rectangle at its anchor corner.
    pub(crate) fn begin(id: ShapeId, anchor: Point, color: ShapeColor, label: String) -> Self {
        Self {
            id,
            anchor,
            corner: None,
            color,
            label,
        }
    }

    /// Replace the dragged corner.
    pub(crate) fn set_corner(&mut self, corner: Point) {
        self.corner = Some(corner);
    }

    /// Whether the drag has produced the second corner.
    pub fn has_extent(&self) -> bool {
        self.corner.is_some()
    }

    /// The normalized axis-aligned box spanning the two corners.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.corner.unwrap_or(self.anchor))
    }

    /// Ordered points as stored: anchor first, then the dragged corner.
    pub fn points(&self) -> Vec<Point> {
        match self.corner {
            Some(corner) => vec![self.anchor, corner],
            None => vec![self.anchor],
        }
    }
}
