//! Subtractive eraser strokes layered onto a shape.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// One continuous eraser pass over a single shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraserStroke {
    pub points: Vec<Point>,
    pub width: f64,
}

impl EraserStroke {
    pub fn new(start: Point, width: f64) -> Self {
        Self {
            points: vec![start],
            width,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Area painted out by this stroke, including its width.
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };
        let pad = self.width / 2.0;
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
            .inflate(pad, pad)
    }
}
