//! Renderer abstraction for the annotation overlay.

use kurbo::{BezPath, Line, Point, Rect, Shape as KurboShape};
use peniko::Color;
use thiserror::Error;
use vidmark_core::mapper::{self, DisplayRect, SourceSize};
use vidmark_core::shapes::{Shape, ShapeId, ShapeKind};
use vidmark_core::ShapeCollection;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// Committed shapes, in z-order.
    pub shapes: &'a ShapeCollection,
    /// Shape currently under construction, if any.
    pub draft: Option<&'a Shape>,
    /// Current display-rectangle bounds.
    pub display: DisplayRect,
    /// Current native source dimensions.
    pub source: SourceSize,
}

impl<'a> RenderContext<'a> {
    /// Create a render context without an in-progress shape.
    pub fn new(shapes: &'a ShapeCollection, display: DisplayRect, source: SourceSize) -> Self {
        Self {
            shapes,
            draft: None,
            display,
            source,
        }
    }

    /// Include the in-progress shape.
    pub fn with_draft(mut self, draft: Option<&'a Shape>) -> Self {
        self.draft = draft;
        self
    }
}

/// Everything needed to paint one shape, in display coordinates.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: ShapeId,
    pub color: Color,
    /// Outline path; empty while a drag shape still has a single point.
    pub outline: BezPath,
    /// Preview segment closing an in-progress polygon (last vertex back to
    /// the first); present once three or more vertices exist.
    pub closing_hint: Option<Line>,
    /// One marker per vertex.
    pub markers: Vec<Point>,
    /// Label text anchored at the first vertex.
    pub label: Option<(Point, String)>,
}

/// A full visual description of the overlay, ready for a backend to paint.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Nodes back to front; the draft node, when present, is last.
    pub nodes: Vec<SceneNode>,
}

/// Build the scene for the current state.
///
/// Pure and idempotent: callers re-invoke after any collection, draft,
/// display-rectangle, or source-size change and repaint in full. Every
/// stored point converts from source to display coordinates here; while the
/// source size is unknown the conversion is identity and shapes draw at
/// their stored coordinates.
pub fn build_scene(ctx: &RenderContext) -> Scene {
    let mut nodes: Vec<SceneNode> = ctx
        .shapes
        .iter()
        .map(|shape| shape_node(shape, false, ctx))
        .collect();
    if let Some(draft) = ctx.draft {
        nodes.push(shape_node(draft, true, ctx));
    }
    Scene { nodes }
}

fn shape_node(shape: &Shape, in_progress: bool, ctx: &RenderContext) -> SceneNode {
    let points: Vec<Point> = shape
        .points()
        .into_iter()
        .map(|p| mapper::to_display(p, ctx.display, ctx.source))
        .collect();

    let mut closing_hint = None;
    let outline = match shape.kind() {
        ShapeKind::Rectangle => rect_outline(&points),
        ShapeKind::Circle => circle_outline(&points),
        ShapeKind::Polygon if in_progress => {
            if points.len() >= 3 {
                closing_hint = Some(Line::new(points[points.len() - 1], points[0]));
            }
            polygon_outline(&points, false)
        }
        ShapeKind::Polygon => polygon_outline(&points, true),
    };

    SceneNode {
        id: shape.id(),
        color: shape.color().into(),
        outline,
        closing_hint,
        label: points.first().map(|&p| (p, shape.label().to_string())),
        markers: points,
    }
}

/// Normalized rectangle outline from the two converted corners.
fn rect_outline(points: &[Point]) -> BezPath {
    if points.len() < 2 {
        return BezPath::new();
    }
    Rect::from_points(points[0], points[1]).to_path(0.1)
}

/// Circle outline with the radius measured between the converted center and
/// rim points. Under non-uniform scaling this is an approximation.
fn circle_outline(points: &[Point]) -> BezPath {
    if points.len() < 2 {
        return BezPath::new();
    }
    let radius = points[0].distance(points[1]);
    kurbo::Circle::new(points[0], radius).to_path(0.1)
}

fn polygon_outline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    for &p in rest {
        path.line_to(p);
    }
    if closed && points.len() >= 3 {
        path.close_path();
    }
    path
}

/// Trait for rendering backends.
///
/// Implementations paint a built scene onto the embedding layer's surface
/// (a 2D canvas, a GPU pipeline, a test recorder); the engine ships none.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> RenderResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use vidmark_core::shapes::{IdentitySource, SequentialIdentity};

    fn shape(kind: ShapeKind, points: &[Point]) -> Shape {
        let mut identity = SequentialIdentity::default();
        let mut shape = Shape::begin(kind, points[0], 1, &mut identity);
        for &p in &points[1..] {
            shape.append_point(p);
        }
        shape
    }

    fn committed(shapes: Vec<Shape>) -> ShapeCollection {
        let mut collection = ShapeCollection::new();
        for s in shapes {
            collection.add(s);
        }
        collection
    }

    fn is_closed(path: &BezPath) -> bool {
        matches!(path.elements().last(), Some(PathEl::ClosePath))
    }

    #[test]
    fn test_committed_polygon_closed() {
        let poly = shape(
            ShapeKind::Polygon,
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        );
        let collection = committed(vec![poly]);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        );

        let scene = build_scene(&ctx);
        assert_eq!(scene.nodes.len(), 1);
        assert!(is_closed(&scene.nodes[0].outline));
        assert!(scene.nodes[0].closing_hint.is_none());
        assert_eq!(scene.nodes[0].markers.len(), 3);
    }

    #[test]
    fn test_draft_polygon_open_with_closing_hint() {
        let collection = ShapeCollection::new();
        let draft = shape(
            ShapeKind::Polygon,
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        );
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        )
        .with_draft(Some(&draft));

        let scene = build_scene(&ctx);
        let node = &scene.nodes[0];
        assert!(!is_closed(&node.outline));

        let hint = node.closing_hint.expect("3 vertices preview the close");
        assert!((hint.p0.x - 10.0).abs() < 1e-9);
        assert!((hint.p0.y - 10.0).abs() < 1e-9);
        assert!(hint.p1.x.abs() < 1e-9);
        assert!(hint.p1.y.abs() < 1e-9);
    }

    #[test]
    fn test_draft_polygon_two_vertices_has_no_hint() {
        let collection = ShapeCollection::new();
        let draft = shape(
            ShapeKind::Polygon,
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
        );
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        )
        .with_draft(Some(&draft));

        let scene = build_scene(&ctx);
        assert!(scene.nodes[0].closing_hint.is_none());
        assert!(!is_closed(&scene.nodes[0].outline));
    }

    #[test]
    fn test_points_scaled_into_display_space() {
        let rect = shape(
            ShapeKind::Rectangle,
            &[Point::new(0.0, 0.0), Point::new(1920.0, 1080.0)],
        );
        let collection = committed(vec![rect]);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::new(10.0, 20.0, 960.0, 540.0),
            SourceSize::new(1920.0, 1080.0),
        );

        let scene = build_scene(&ctx);
        let markers = &scene.nodes[0].markers;
        assert!((markers[0].x - 10.0).abs() < 1e-9);
        assert!((markers[0].y - 20.0).abs() < 1e-9);
        assert!((markers[1].x - 970.0).abs() < 1e-9);
        assert!((markers[1].y - 560.0).abs() < 1e-9);

        let bounds = scene.nodes[0].outline.bounding_box();
        assert!((bounds.width() - 960.0).abs() < 1e-6);
        assert!((bounds.height() - 540.0).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_drag_rectangle_normalized() {
        let rect = shape(
            ShapeKind::Rectangle,
            &[Point::new(50.0, 50.0), Point::new(10.0, 20.0)],
        );
        let collection = committed(vec![rect]);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        );

        let bounds = build_scene(&ctx).nodes[0].outline.bounding_box();
        assert!((bounds.x0 - 10.0).abs() < 1e-6);
        assert!((bounds.y0 - 20.0).abs() < 1e-6);
        assert!((bounds.x1 - 50.0).abs() < 1e-6);
        assert!((bounds.y1 - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_radius_from_converted_points() {
        let circle = shape(
            ShapeKind::Circle,
            &[Point::new(100.0, 100.0), Point::new(160.0, 100.0)],
        );
        let collection = committed(vec![circle]);
        // Uniform 2x downscale: radius 60 in source becomes 30 on screen.
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(960.0, 540.0),
            SourceSize::new(1920.0, 1080.0),
        );

        let bounds = build_scene(&ctx).nodes[0].outline.bounding_box();
        assert!((bounds.width() - 60.0).abs() < 1e-6);
        assert!((bounds.center().x - 50.0).abs() < 1e-6);
        assert!((bounds.center().y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_point_draft_marker_only() {
        let collection = ShapeCollection::new();
        let draft = shape(ShapeKind::Circle, &[Point::new(5.0, 5.0)]);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        )
        .with_draft(Some(&draft));

        let scene = build_scene(&ctx);
        let node = &scene.nodes[0];
        assert!(node.outline.elements().is_empty());
        assert_eq!(node.markers.len(), 1);
        assert_eq!(node.label.as_ref().map(|(_, l)| l.as_str()), Some("Region 1"));
    }

    #[test]
    fn test_draft_rendered_last() {
        let mut identity = SequentialIdentity::default();
        let mut rect = Shape::begin(ShapeKind::Rectangle, Point::new(0.0, 0.0), 1, &mut identity);
        rect.append_point(Point::new(5.0, 5.0));
        let collection = committed(vec![rect]);
        let draft = Shape::begin(ShapeKind::Polygon, Point::new(1.0, 1.0), 2, &mut identity);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(100.0, 100.0),
            SourceSize::UNKNOWN,
        )
        .with_draft(Some(&draft));

        let scene = build_scene(&ctx);
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[1].id, draft.id());
    }

    #[test]
    fn test_scene_deterministic() {
        let poly = shape(
            ShapeKind::Polygon,
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        );
        let collection = committed(vec![poly]);
        let ctx = RenderContext::new(
            &collection,
            DisplayRect::from_size(200.0, 100.0),
            SourceSize::new(400.0, 400.0),
        );

        let a = build_scene(&ctx);
        let b = build_scene(&ctx);
        assert_eq!(a.nodes.len(), b.nodes.len());
        assert_eq!(a.nodes[0].markers, b.nodes[0].markers);
        assert_eq!(
            a.nodes[0].outline.elements(),
            b.nodes[0].outline.elements()
        );
    }
}
