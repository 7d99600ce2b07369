//! Straight line shape.

use super::ShapeTrait;
use crate::geometry::distance_to_segment;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A single straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

impl ShapeTrait for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        distance_to_segment(point, self.start, self.end) < tolerance
    }

    fn origin(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn extend_to(&mut self, point: Point) {
        self.end = point;
    }
}
