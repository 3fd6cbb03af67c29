//! Circle region.

use super::{ShapeColor, ShapeId};
use kurbo::Point;

/// A circular region defined by its center and a point on the circumference.
///
/// Both points are stored in source coordinates; the radius is derived.
#[derive(Debug, Clone)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center (the press point), in source coordinates.
    pub center: Point,
    /// Point on the circumference, absent until the drag produces one.
    pub rim: Option<Point>,
    /// Display color assigned at creation.
    pub color: ShapeColor,
    /// Human-readable name.
    pub label: String,
}

impl Circle {
    /// Start a circle at its center.
    pub(crate) fn begin(id: ShapeId, center: Point, color: ShapeColor, label: String) -> Self {
        Self {
            id,
            center,
            rim: None,
            color,
            label,
        }
    }

    /// Replace the dragged rim point.
    pub(crate) fn set_rim(&mut self, rim: Point) {
        self.rim = Some(rim);
    }

    /// Whether the drag has produced the rim point.
    pub fn has_extent(&self) -> bool {
        self.rim.is_some()
    }

    /// Euclidean distance from center to rim; zero before the drag.
    pub fn radius(&self) -> f64 {
        self.rim.map_or(0.0, |rim| self.center.distance(rim))
    }

    /// Ordered points as stored: center first, then the rim point.
    pub fn points(&self) -> Vec<Point> {
        match self.rim {
            Some(rim) => vec![self.center, rim],
            None => vec![self.center],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{IdentitySource, SequentialIdentity};

    fn circle(center: Point) -> Circle {
        let (id, color) = SequentialIdentity::default().next_identity();
        Circle::begin(id, center, color, "Region 1".to_string())
    }

    #[test]
    fn test_radius_from_rim() {
        let mut c = circle(Point::new(0.0, 0.0));
        assert!(c.radius().abs() < f64::EPSILON);

        c.set_rim(Point::new(3.0, 4.0));
        assert!((c.radius() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rim_replaced_on_drag() {
        let mut c = circle(Point::new(10.0, 10.0));
        c.set_rim(Point::new(12.0, 10.0));
        c.set_rim(Point::new(20.0, 10.0));

        assert_eq!(
            c.points(),
            vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]
        );
        assert!((c.radius() - 10.0).abs() < 1e-9);
    }
}
