//! Drawing state machine: turns pointer events into shapes.

use crate::shapes::{IdentitySource, RandomIdentity, Shape, ShapeKind};
use kurbo::Point;

/// State of the drawing interaction.
#[derive(Debug, Clone, Default)]
pub enum DrawState {
    /// No shape under construction.
    #[default]
    Idle,
    /// A shape is being built; it joins the collection only on commit.
    Drawing(Shape),
}

/// Tracks in-progress shape construction from pointer events and tool
/// selection.
///
/// All points arriving here are already in source coordinates; the overlay
/// converts from display coordinates before calling. The machine runs for
/// the overlay's whole lifetime; commit and cancel both return it to idle.
pub struct Annotator {
    tool: ShapeKind,
    state: DrawState,
    /// Count of shapes begun so far, feeding default labels.
    created: u64,
    identity: Box<dyn IdentitySource>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    /// Create an annotator with the default random identity source.
    pub fn new() -> Self {
        Self::with_identity(Box::new(RandomIdentity))
    }

    /// Create an annotator with a custom identity source (tests use a
    /// deterministic one).
    pub fn with_identity(identity: Box<dyn IdentitySource>) -> Self {
        Self {
            tool: ShapeKind::default(),
            state: DrawState::Idle,
            created: 0,
            identity,
        }
    }

    pub fn tool(&self) -> ShapeKind {
        self.tool
    }

    /// Switch the active tool.
    ///
    /// Ignored while a shape is under construction; finish or cancel first.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        if self.is_drawing() {
            log::debug!("tool change to {} ignored while drawing", tool.name());
            return;
        }
        self.tool = tool;
    }

    /// Whether a shape is under construction.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing(_))
    }

    /// Current machine state.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// The shape currently under construction, if any.
    pub fn draft(&self) -> Option<&Shape> {
        match &self.state {
            DrawState::Drawing(shape) => Some(shape),
            DrawState::Idle => None,
        }
    }

    /// Handle a pointer press at a source-space point.
    ///
    /// Starts a new shape when idle. While drawing, a press places the next
    /// polygon vertex; for drag shapes it updates the dragged point.
    pub fn pointer_down(&mut self, point: Point) {
        match &mut self.state {
            DrawState::Idle => {
                self.created += 1;
                let shape = Shape::begin(self.tool, point, self.created, self.identity.as_mut());
                self.state = DrawState::Drawing(shape);
            }
            DrawState::Drawing(shape) => shape.append_point(point),
        }
    }

    /// Handle pointer movement.
    ///
    /// Only drag shapes (rectangle, circle) resize continuously; polygon
    /// vertices are placed by presses alone. Every move updates the dragged
    /// point, with no movement threshold.
    pub fn pointer_move(&mut self, point: Point) {
        if let DrawState::Drawing(shape) = &mut self.state {
            if shape.kind() != ShapeKind::Polygon {
                shape.append_point(point);
            }
        }
    }

    /// Handle a pointer release, committing a finished drag shape.
    ///
    /// A draft without enough geometry (a press that never moved) is not
    /// committed; the transition is refused and the draft stays in progress.
    pub fn pointer_up(&mut self) -> Option<Shape> {
        match &self.state {
            DrawState::Drawing(shape)
                if shape.kind() != ShapeKind::Polygon && shape.is_committable() =>
            {
                self.take_draft()
            }
            _ => None,
        }
    }

    /// Handle a double click, committing a finished polygon.
    ///
    /// With fewer than [`crate::shapes::Polygon::MIN_VERTICES`] vertices this
    /// is a silent no-op: the draft stays open, neither committed nor
    /// discarded.
    pub fn double_click(&mut self) -> Option<Shape> {
        match &self.state {
            DrawState::Drawing(shape)
                if shape.kind() == ShapeKind::Polygon && shape.is_committable() =>
            {
                self.take_draft()
            }
            _ => None,
        }
    }

    /// Discard the in-progress shape (right click).
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
    }

    fn take_draft(&mut self) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            DrawState::Drawing(shape) => Some(shape),
            DrawState::Idle => None,
        }
    }
}
