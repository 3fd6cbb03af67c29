//! Vidmark Core Library
//!
//! Platform-agnostic data structures and logic for the vidmark video region
//! annotation engine: the shape model, the display/source coordinate mapper,
//! the drawing state machine, and the snapshot export.

pub mod annotator;
pub mod collection;
pub mod mapper;
pub mod overlay;
pub mod shapes;
pub mod snapshot;

pub use annotator::{Annotator, DrawState};
pub use collection::ShapeCollection;
pub use mapper::{to_display, to_source, DisplayRect, SourceSize};
pub use overlay::{Overlay, SubscriberId};
pub use shapes::{
    Circle, IdentitySource, Polygon, RandomIdentity, Rectangle, SequentialIdentity, Shape,
    ShapeColor, ShapeId, ShapeKind,
};
pub use snapshot::{PointRecord, ShapeRecord, Snapshot};
