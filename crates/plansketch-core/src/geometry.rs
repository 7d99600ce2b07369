//! Snapping, distance and rotation helpers shared by every engine.
//!
//! Rotations follow the drawing-surface convention: y grows downward and a
//! positive angle turns clockwise on screen. Rotatable entities always pivot
//! about their geometric center; [`Frame`] is the only place that applies the
//! pivot, so hit-testing and resize math cannot drift apart.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Quantize a coordinate to the nearest grid line.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Quantize both coordinates of a point to the nearest grid intersection.
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(snap(point.x, grid_size), snap(point.y, grid_size))
}

/// Round to the nearest multiple of `step` (placement rounding for objects).
pub fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Distance from a point to the segment `a`→`b`.
///
/// A degenerate segment (`a == b`) yields the distance to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline. Infinite for fewer than two points.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_to_segment(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Rotate a world-space delta into an entity's unrotated local frame.
pub fn world_to_local(delta: Vec2, rotation_radians: f64) -> Vec2 {
    let (sin, cos) = rotation_radians.sin_cos();
    Vec2::new(delta.x * cos + delta.y * sin, -delta.x * sin + delta.y * cos)
}

/// Rotate a local-frame delta back into world space.
pub fn local_to_world(delta: Vec2, rotation_radians: f64) -> Vec2 {
    let (sin, cos) = rotation_radians.sin_cos();
    Vec2::new(delta.x * cos - delta.y * sin, delta.x * sin + delta.y * cos)
}

/// An oriented rectangle: unrotated top-left `origin`, `size`, and a rotation
/// in degrees about the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
    pub rotation_degrees: f64,
}

impl Frame {
    pub fn new(origin: Point, size: Size, rotation_degrees: f64) -> Self {
        Self {
            origin,
            size,
            rotation_degrees,
        }
    }

    /// Rotation pivot.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Express a world point relative to the unrotated top-left corner.
    pub fn to_local(&self, world: Point) -> Point {
        let local = world_to_local(world - self.center(), self.rotation_radians());
        Point::new(
            local.x + self.size.width / 2.0,
            local.y + self.size.height / 2.0,
        )
    }

    /// Inverse of [`Frame::to_local`].
    pub fn to_world(&self, local: Point) -> Point {
        let from_center = Vec2::new(
            local.x - self.size.width / 2.0,
            local.y - self.size.height / 2.0,
        );
        self.center() + local_to_world(from_center, self.rotation_radians())
    }

    /// World position of the four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (w, h) = (self.size.width, self.size.height);
        [
            self.to_world(Point::new(0.0, 0.0)),
            self.to_world(Point::new(w, 0.0)),
            self.to_world(Point::new(w, h)),
            self.to_world(Point::new(0.0, h)),
        ]
    }
}
