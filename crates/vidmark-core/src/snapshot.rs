//! Snapshot export of the committed collection.

use crate::collection::ShapeCollection;
use crate::mapper::SourceSize;
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A point on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

/// One committed shape as exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Points in source coordinates.
    pub points: Vec<PointRecord>,
    /// Display color as a `#rrggbb` string.
    pub color: String,
    pub label: String,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            id: shape.id().to_string(),
            kind: shape.kind(),
            points: shape.points().into_iter().map(PointRecord::from).collect(),
            color: shape.color().to_hex(),
            label: shape.label().to_string(),
        }
    }
}

/// Point-in-time export of the committed shapes plus source dimensions.
///
/// The in-progress shape is never part of a snapshot; it lives in the
/// annotator until committed. This flat document is the engine's only wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub shapes: Vec<ShapeRecord>,
    pub source_dimensions: SourceSize,
    /// Capture time in milliseconds since the Unix epoch (not shape
    /// creation time).
    pub timestamp: u64,
}

impl Snapshot {
    /// Capture the collection at the current wall-clock time.
    pub fn capture(collection: &ShapeCollection, source: SourceSize) -> Self {
        Self::capture_at(collection, source, unix_millis())
    }

    /// Capture with an explicit timestamp.
    pub fn capture_at(collection: &ShapeCollection, source: SourceSize, timestamp: u64) -> Self {
        Self {
            shapes: collection.iter().map(ShapeRecord::from).collect(),
            source_dimensions: source,
            timestamp,
        }
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Milliseconds since the Unix epoch; zero if the clock predates it.
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
