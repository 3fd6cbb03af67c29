//! Shape definitions for the annotation overlay.

mod circle;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The kinds of region a user can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Polygon,
}

impl ShapeKind {
    /// Display name for tool selectors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
        }
    }

    /// All drawable kinds, in tool-selector order.
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Polygon]
    }
}

/// Serializable RGB color; the wire form is a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ShapeColor {
    /// Saturation used for generated shape colors.
    const HUE_SATURATION: f64 = 0.72;
    /// Brightness used for generated shape colors.
    const HUE_VALUE: f64 = 0.92;

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a shape color from a hue in degrees.
    pub fn from_hue(hue: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(hue.rem_euclid(360.0), Self::HUE_SATURATION, Self::HUE_VALUE);
        Self::new(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    /// Format as a `#rrggbb` hex string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// Convert HSV (hue in degrees, saturation/value in `0..=1`) to RGB in `0..=1`.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Allocates the identity of a new shape: its id and display color.
///
/// Injectable so tests can substitute a deterministic source.
pub trait IdentitySource {
    fn next_identity(&mut self) -> (ShapeId, ShapeColor);
}

/// Default identity source: v4 UUIDs and a pseudo-random hue.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentity;

impl IdentitySource for RandomIdentity {
    fn next_identity(&mut self) -> (ShapeId, ShapeColor) {
        (Uuid::new_v4(), ShapeColor::from_hue(generate_hue()))
    }
}

/// Derive a pseudo-random hue for new shapes.
/// Uses a counter + hash approach that needs no wall clock (splitmix32-like).
fn generate_hue() -> f64 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static HUE_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = HUE_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    f64::from(x % 360)
}

/// Deterministic identity source for tests: sequential ids, stepped hues.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIdentity {
    next: u64,
}

impl IdentitySource for SequentialIdentity {
    fn next_identity(&mut self) -> (ShapeId, ShapeColor) {
        self.next += 1;
        (
            Uuid::from_u128(u128::from(self.next)),
            ShapeColor::from_hue(self.next as f64 * 47.0),
        )
    }
}

/// Enum wrapper for all shape types.
///
/// All stored points are in source coordinates. A shape is mutable only
/// while it is the drawing state machine's draft; the committed collection
/// hands out shared references exclusively.
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    /// Start a new shape of the given kind at its first point.
    ///
    /// `ordinal` is the 1-based count of shapes begun so far, of any kind,
    /// and feeds the default label.
    pub fn begin(
        kind: ShapeKind,
        first: Point,
        ordinal: u64,
        identity: &mut dyn IdentitySource,
    ) -> Self {
        let (id, color) = identity.next_identity();
        let label = format!("Region {ordinal}");
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::begin(id, first, color, label)),
            ShapeKind::Circle => Shape::Circle(Circle::begin(id, first, color, label)),
            ShapeKind::Polygon => Shape::Polygon(Polygon::begin(id, first, color, label)),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Polygon(s) => s.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn color(&self) -> ShapeColor {
        match self {
            Shape::Rectangle(s) => s.color,
            Shape::Circle(s) => s.color,
            Shape::Polygon(s) => s.color,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Shape::Rectangle(s) => &s.label,
            Shape::Circle(s) => &s.label,
            Shape::Polygon(s) => &s.label,
        }
    }

    /// Ordered points as stored, in source coordinates.
    ///
    /// Rectangle: anchor then dragged corner. Circle: center then rim.
    /// Polygon: vertices in click order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Rectangle(s) => s.points(),
            Shape::Circle(s) => s.points(),
            Shape::Polygon(s) => s.points(),
        }
    }

    /// Extend the shape with a new point while under construction.
    ///
    /// Polygons append a vertex; rectangles and circles replace their second
    /// point (drag-based construction keeps exactly two).
    pub fn append_point(&mut self, point: Point) {
        match self {
            Shape::Rectangle(s) => s.set_corner(point),
            Shape::Circle(s) => s.set_rim(point),
            Shape::Polygon(s) => s.push_vertex(point),
        }
    }

    /// Whether the shape has enough geometry to be committed.
    pub fn is_committable(&self) -> bool {
        match self {
            Shape::Rectangle(s) => s.has_extent(),
            Shape::Circle(s) => s.has_extent(),
            Shape::Polygon(s) => s.vertex_count() >= Polygon::MIN_VERTICES,
        }
    }
}
