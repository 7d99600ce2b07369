//! Freehand-mode shapes and their eraser overlays.

mod circle;
mod eraser;
mod freehand;
mod line;
mod rectangle;

pub use circle::Circle;
pub use eraser::EraserStroke;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Geometry operations every shape kind provides.
pub trait ShapeTrait {
    /// Axis-aligned bounds in world coordinates (normalized, non-negative size).
    fn bounds(&self) -> Rect;

    /// Check if a world point hits this shape within `tolerance`.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Reference point used as the drag anchor by the move tool.
    fn origin(&self) -> Point;

    /// Translate every coordinate by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Update the terminal geometry while the shape is being drawn.
    fn extend_to(&mut self, point: Point);
}

/// Discriminant of [`ShapeGeometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Line,
    Free,
}

impl ShapeKind {
    /// Base of the auto-generated layer name.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::Free => "Stroke",
        }
    }

    /// Zero-size geometry of this kind anchored at `point`.
    pub fn anchored_at(self, point: Point) -> ShapeGeometry {
        match self {
            ShapeKind::Rect => ShapeGeometry::Rect(Rectangle::new(point, 0.0, 0.0)),
            ShapeKind::Circle => ShapeGeometry::Circle(Circle::new(point, 0.0)),
            ShapeKind::Line => ShapeGeometry::Line(Line::new(point, point)),
            ShapeKind::Free => ShapeGeometry::Free(Freehand::from_points(vec![point])),
        }
    }
}

/// Type-specific geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeGeometry {
    Rect(Rectangle),
    Circle(Circle),
    Line(Line),
    Free(Freehand),
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rect(_) => ShapeKind::Rect,
            ShapeGeometry::Circle(_) => ShapeKind::Circle,
            ShapeGeometry::Line(_) => ShapeKind::Line,
            ShapeGeometry::Free(_) => ShapeKind::Free,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            ShapeGeometry::Rect(s) => s,
            ShapeGeometry::Circle(s) => s,
            ShapeGeometry::Line(s) => s,
            ShapeGeometry::Free(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            ShapeGeometry::Rect(s) => s,
            ShapeGeometry::Circle(s) => s,
            ShapeGeometry::Line(s) => s,
            ShapeGeometry::Free(s) => s,
        }
    }
}

impl ShapeTrait for ShapeGeometry {
    fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    fn origin(&self) -> Point {
        self.as_trait().origin()
    }

    fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    fn extend_to(&mut self, point: Point) {
        self.as_trait_mut().extend_to(point);
    }
}

/// A layer in the freehand drawing.
///
/// Erasing never touches `geometry`: cutouts are stacked in
/// `eraser_strokes` and composited subtractively by the renderer, clipped
/// to this shape alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    #[serde(default)]
    pub eraser_strokes: Vec<EraserStroke>,
    pub geometry: ShapeGeometry,
}

impl Shape {
    /// Create a visible, unlocked shape with no cutouts.
    pub fn new(name: impl Into<String>, geometry: ShapeGeometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            visible: true,
            locked: false,
            eraser_strokes: Vec::new(),
            geometry,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Region a renderer clips this shape's cutouts to.
    pub fn paint_bounds(&self, stroke_width: f64) -> Rect {
        let pad = stroke_width / 2.0;
        self.bounds().inflate(pad, pad)
    }

    /// Hidden or locked shapes are skipped by pointer tools.
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.geometry.hit_test(point, tolerance)
    }

    pub fn origin(&self) -> Point {
        self.geometry.origin()
    }

    /// Move the geometry and every cutout by the same delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.geometry.translate(delta);
        for stroke in &mut self.eraser_strokes {
            stroke.translate(delta);
        }
    }

    /// Start a new cutout at `point`. Returns its index.
    pub fn begin_eraser_stroke(&mut self, point: Point, width: f64) -> usize {
        self.eraser_strokes.push(EraserStroke::new(point, width));
        self.eraser_strokes.len() - 1
    }

    /// Append a point to an existing cutout. Returns false for a bad index.
    pub fn extend_eraser_stroke(&mut self, index: usize, point: Point) -> bool {
        match self.eraser_strokes.get_mut(index) {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_geometry_is_degenerate() {
        let p = Point::new(10.0, 20.0);
        for kind in [ShapeKind::Rect, ShapeKind::Circle, ShapeKind::Line, ShapeKind::Free] {
            let geometry = kind.anchored_at(p);
            assert_eq!(geometry.kind(), kind);
            assert_eq!(geometry.origin(), p);
            let b = geometry.bounds();
            assert!(b.width().abs() < f64::EPSILON && b.height().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_translate_moves_cutouts() {
        let mut shape = Shape::new(
            "Rectangle 1",
            ShapeGeometry::Rect(Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0)),
        );
        let idx = shape.begin_eraser_stroke(Point::new(10.0, 10.0), 18.0);
        shape.extend_eraser_stroke(idx, Point::new(20.0, 15.0));

        shape.translate(Vec2::new(5.0, -5.0));

        assert_eq!(shape.origin(), Point::new(5.0, -5.0));
        assert_eq!(
            shape.eraser_strokes[0].points,
            vec![Point::new(15.0, 5.0), Point::new(25.0, 10.0)]
        );
    }

    #[test]
    fn test_paint_bounds_cover_negative_rect() {
        // Drawn up and to the left from (100, 100).
        let shape = Shape::new(
            "Rectangle 1",
            ShapeGeometry::Rect(Rectangle::new(Point::new(100.0, 100.0), -40.0, -20.0)),
        );
        let clip = shape.paint_bounds(2.0);
        assert!((clip.x0 - 59.0).abs() < f64::EPSILON);
        assert!((clip.y0 - 79.0).abs() < f64::EPSILON);
        assert!((clip.x1 - 101.0).abs() < f64::EPSILON);
        assert!((clip.y1 - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paint_bounds_of_line_include_stroke() {
        let mut shape = Shape::new("Line 1", ShapeKind::Line.anchored_at(Point::new(10.0, 10.0)));
        shape.geometry.extend_to(Point::new(50.0, 10.0));
        let clip = shape.paint_bounds(4.0);
        assert!((clip.width() - 44.0).abs() < f64::EPSILON);
        assert!((clip.height() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extend_bad_stroke_index() {
        let mut shape = Shape::new("Line 1", ShapeKind::Line.anchored_at(Point::ZERO));
        assert!(!shape.extend_eraser_stroke(3, Point::ZERO));
    }

    #[test]
    fn test_interactive_flags() {
        let mut shape = Shape::new("Circle 1", ShapeKind::Circle.anchored_at(Point::ZERO));
        assert!(shape.is_interactive());
        shape.locked = true;
        assert!(!shape.is_interactive());
        shape.locked = false;
        shape.visible = false;
        assert!(!shape.is_interactive());
    }

    #[test]
    fn test_serialized_geometry_is_tagged() {
        let shape = Shape::new("Circle 1", ShapeKind::Circle.anchored_at(Point::new(1.0, 2.0)));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["geometry"]["type"], "circle");
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }
}
