//! Freehand polyline shape.

use super::ShapeTrait;
use crate::geometry::distance_to_polyline;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of points).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub points: Vec<Point>,
}

impl Freehand {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => point.distance(*only) < tolerance,
            points => distance_to_polyline(point, points) < tolerance,
        }
    }

    fn origin(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn extend_to(&mut self, point: Point) {
        self.points.push(point);
    }
}
