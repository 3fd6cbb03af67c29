//! Coordinate mapping between the display surface and the video source.
//!
//! Pointer events arrive in client coordinates of the rendered surface;
//! shapes are stored in the native resolution of the decoded frame. The two
//! conversions here are the only way points cross that boundary.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Bounding rectangle of the display surface, in page/client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    /// Left edge offset within the page.
    pub x: f64,
    /// Top edge offset within the page.
    pub y: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl DisplayRect {
    /// Create a display rectangle from its page offset and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the page origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether the rectangle has a usable area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Native pixel dimensions of the decoded video frame.
///
/// Dimensions are either both zero (the player has not reported a size yet)
/// or both positive. Conversions degrade to identity while unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceSize {
    pub width: f64,
    pub height: f64,
}

impl SourceSize {
    /// Size placeholder while the player has not reported dimensions.
    pub const UNKNOWN: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a source size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether real dimensions have been reported.
    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Convert a point from display coordinates to source coordinates.
///
/// The display rectangle's page offset is removed first, so client-coordinate
/// origins that differ from the rectangle's local origin map correctly. Axes
/// scale independently; aspect-ratio mismatches are left to the display
/// surface's own letterboxing.
pub fn to_source(display_point: Point, rect: DisplayRect, source: SourceSize) -> Point {
    if !source.is_known() || !rect.has_area() {
        return display_point;
    }
    let local = Point::new(display_point.x - rect.x, display_point.y - rect.y);
    Point::new(
        local.x * source.width / rect.width,
        local.y * source.height / rect.height,
    )
}

/// Convert a point from source coordinates back to display coordinates.
///
/// Exact inverse of [`to_source`], including the identity fallback while the
/// source size is unknown.
pub fn to_display(source_point: Point, rect: DisplayRect, source: SourceSize) -> Point {
    if !source.is_known() || !rect.has_area() {
        return source_point;
    }
    Point::new(
        source_point.x * rect.width / source.width + rect.x,
        source_point.y * rect.height / source.height + rect.y,
    )
}
