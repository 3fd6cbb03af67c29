//! Annotation overlay: composition root and external interface.

use crate::annotator::Annotator;
use crate::collection::ShapeCollection;
use crate::mapper::{self, DisplayRect, SourceSize};
use crate::shapes::{IdentitySource, Shape, ShapeId, ShapeKind};
use crate::snapshot::Snapshot;
use kurbo::Point;

/// Handle for a registered snapshot subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type SnapshotCallback = Box<dyn FnMut(&Snapshot)>;

/// The annotation overlay over a video surface.
///
/// Pointer events arrive in display coordinates and are normalized into
/// source coordinates before reaching the drawing state machine; committed
/// shapes therefore survive display resizes unchanged. The media
/// collaborator feeds in the current display rectangle and native source
/// size; the chrome layer drives tools, list operations, and export.
///
/// Nothing here is fatal: degenerate input refuses a transition or falls
/// back to identity mapping.
pub struct Overlay {
    collection: ShapeCollection,
    annotator: Annotator,
    display: DisplayRect,
    source: SourceSize,
    subscribers: Vec<(SubscriberId, SnapshotCallback)>,
    next_subscriber: u64,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    /// Create an overlay with the default random identity source.
    pub fn new() -> Self {
        Self {
            collection: ShapeCollection::new(),
            annotator: Annotator::new(),
            display: DisplayRect::default(),
            source: SourceSize::UNKNOWN,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Create an overlay with a custom identity source.
    pub fn with_identity(identity: Box<dyn IdentitySource>) -> Self {
        Self {
            annotator: Annotator::with_identity(identity),
            ..Self::new()
        }
    }

    // --- collaborator notifications ---

    /// Update the display-rectangle bounds after a layout change or resize.
    ///
    /// Committed geometry is unaffected; the next render pass picks the new
    /// rectangle up.
    pub fn set_display_rect(&mut self, rect: DisplayRect) {
        self.display = rect;
    }

    /// Update the native source dimensions reported by the player.
    ///
    /// Dimensions must be both positive; anything else degrades to unknown,
    /// under which conversions fall back to identity.
    pub fn set_source_size(&mut self, width: f64, height: f64) {
        let size = SourceSize::new(width, height);
        if size.is_known() {
            self.source = size;
            return;
        }
        if width != 0.0 || height != 0.0 {
            log::warn!("degenerate source size {width}x{height} treated as unknown");
        }
        self.source = SourceSize::UNKNOWN;
    }

    pub fn display_rect(&self) -> DisplayRect {
        self.display
    }

    pub fn source_size(&self) -> SourceSize {
        self.source
    }

    // --- pointer events, in display coordinates ---

    pub fn pointer_down(&mut self, point: Point) {
        let point = self.to_source(point);
        self.annotator.pointer_down(point);
    }

    pub fn pointer_move(&mut self, point: Point) {
        let point = self.to_source(point);
        self.annotator.pointer_move(point);
    }

    pub fn pointer_up(&mut self) {
        if let Some(shape) = self.annotator.pointer_up() {
            self.commit(shape);
        }
    }

    pub fn double_click(&mut self) {
        if let Some(shape) = self.annotator.double_click() {
            self.commit(shape);
        }
    }

    /// Cancel the in-progress shape, if any.
    pub fn right_click(&mut self) {
        self.annotator.cancel();
    }

    // --- chrome-facing operations ---

    /// Switch the drawing tool; ignored while a shape is in progress.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.annotator.set_tool(tool);
    }

    pub fn tool(&self) -> ShapeKind {
        self.annotator.tool()
    }

    /// Committed shapes, for the list view and the render pass.
    pub fn shapes(&self) -> &ShapeCollection {
        &self.collection
    }

    /// The in-progress shape, for the render pass.
    pub fn draft(&self) -> Option<&Shape> {
        self.annotator.draft()
    }

    /// Remove every committed shape.
    pub fn clear_all(&mut self) {
        if self.collection.is_empty() {
            return;
        }
        self.collection.clear();
        self.notify();
    }

    /// Remove the most recently committed shape.
    pub fn remove_last(&mut self) -> Option<ShapeId> {
        let removed = self.collection.remove_last()?;
        self.notify();
        Some(removed.id())
    }

    /// Remove a committed shape by id. Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: ShapeId) -> bool {
        if self.collection.remove_by_id(id).is_none() {
            return false;
        }
        self.notify();
        true
    }

    /// Export the committed shapes as a snapshot document.
    pub fn export(&self) -> Snapshot {
        Snapshot::capture(&self.collection, self.source)
    }

    // --- snapshot subscribers ---

    /// Register a callback invoked with a fresh snapshot whenever the
    /// committed collection changes. Release with [`Overlay::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut(&Snapshot) + 'static) -> SubscriberId {
        self.next_subscriber += 1;
        let id = SubscriberId(self.next_subscriber);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self, shape: Shape) {
        self.collection.add(shape);
        self.notify();
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = Snapshot::capture(&self.collection, self.source);
        for (_, callback) in &mut self.subscribers {
            callback(&snapshot);
        }
    }

    fn to_source(&self, point: Point) -> Point {
        mapper::to_source(point, self.display, self.source)
    }
}
