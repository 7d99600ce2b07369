//! Rectangle shape.

use super::ShapeTrait;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A rectangle anchored at the corner where drawing started.
///
/// `width`/`height` keep the sign of the drag, so a rectangle drawn up and
/// to the left has negative size; [`ShapeTrait::bounds`] normalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        Rect::from_points(
            self.position,
            Point::new(self.position.x + self.width, self.position.y + self.height),
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let r = self.bounds().inflate(tolerance, tolerance);
        point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
    }

    fn origin(&self) -> Point {
        self.position
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn extend_to(&mut self, point: Point) {
        self.width = point.x - self.position.x;
        self.height = point.y - self.position.y;
    }
}
