//! Room outline construction: an incrementally built, grid-snapped polygon.

use crate::config::EngineConfig;
use crate::geometry::snap_point;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for outline segments.
pub type SegmentId = Uuid;

/// A wall segment between two consecutive outline points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSegment {
    pub id: SegmentId,
    pub start: Point,
    pub end: Point,
}

impl OutlineSegment {
    fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
        }
    }
}

/// Builds the room outline one click at a time.
///
/// While open, every added point brings one segment with it (except the
/// first). Clicking within one grid cell of the first point, once at least
/// three points exist, seals the polygon with a closing segment and no new
/// point. A closed outline only changes through [`OutlineBuilder::reset`].
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    points: Vec<Point>,
    segments: Vec<OutlineSegment>,
    preview: Option<Point>,
    closed: bool,
    config: EngineConfig,
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            preview: None,
            closed: false,
            config: config.clone(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segments(&self) -> &[OutlineSegment] {
        &self.segments
    }

    /// Snapped rubber-band target while the outline is open.
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Add a vertex (or close the polygon). Returns true if the outline changed.
    pub fn add_point(&mut self, raw: Point) -> bool {
        if self.closed {
            return false;
        }
        if !self.config.on_surface(raw) {
            log::trace!("outline point {raw:?} off surface, ignored");
            return false;
        }
        let point = snap_point(raw, self.config.grid_size);

        let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) else {
            self.points.push(point);
            return true;
        };

        if self.points.len() >= 3 && point.distance(first) < self.config.grid_size {
            self.segments.push(OutlineSegment::new(last, first));
            self.closed = true;
            self.preview = None;
            log::debug!("outline closed with {} points", self.points.len());
            return true;
        }

        self.segments.push(OutlineSegment::new(last, point));
        self.points.push(point);
        true
    }

    /// Track the pointer for the rubber-band line. Cleared once closed.
    pub fn update_preview(&mut self, raw: Point) {
        self.preview = if self.closed {
            None
        } else {
            Some(snap_point(raw, self.config.grid_size))
        };
    }

    /// Remove the last point and its incoming segment. No-op when closed or empty.
    pub fn undo_last_point(&mut self) -> bool {
        if self.closed || self.points.pop().is_none() {
            return false;
        }
        self.segments.pop();
        true
    }

    /// Clear everything, including the closed flag.
    pub fn reset(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.preview = None;
        self.closed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> OutlineBuilder {
        let mut outline = OutlineBuilder::new();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
            outline.add_point(Point::new(x, y));
        }
        outline
    }

    #[test]
    fn test_points_are_snapped() {
        let mut outline = OutlineBuilder::new();
        outline.add_point(Point::new(57.0, 83.0));
        assert_eq!(outline.points(), &[Point::new(40.0, 80.0)]);
        assert!(outline.segments().is_empty());
    }

    #[test]
    fn test_each_point_adds_a_segment() {
        let mut outline = OutlineBuilder::new();
        outline.add_point(Point::new(0.0, 0.0));
        outline.add_point(Point::new(200.0, 0.0));
        assert_eq!(outline.points().len(), 2);
        assert_eq!(outline.segments().len(), 1);
        assert_eq!(outline.segments()[0].start, Point::new(0.0, 0.0));
        assert_eq!(outline.segments()[0].end, Point::new(200.0, 0.0));
    }

    #[test]
    fn test_close_near_anchor() {
        // On the default 40 grid the corners land on 0/120.
        let mut outline = square();
        assert_eq!(outline.points()[2], Point::new(120.0, 120.0));
        assert!(!outline.is_closed());
        assert!(outline.add_point(Point::new(5.0, 3.0)));

        assert!(outline.is_closed());
        assert_eq!(outline.points().len(), 4);
        assert_eq!(outline.segments().len(), 4);
        let closing = outline.segments().last().unwrap();
        assert_eq!(closing.start, *outline.points().last().unwrap());
        assert_eq!(closing.end, outline.points()[0]);
    }

    #[test]
    fn test_closing_segment_connects_last_to_first() {
        let config = EngineConfig {
            grid_size: 20.0,
            ..EngineConfig::default()
        };
        let mut outline = OutlineBuilder::with_config(&config);
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (4.0, 6.0)] {
            outline.add_point(Point::new(x, y));
        }
        assert!(outline.is_closed());
        assert_eq!(outline.points().len(), 4);
        assert_eq!(outline.segments().len(), 4);
        let closing = &outline.segments()[3];
        assert_eq!(closing.start, Point::new(0.0, 100.0));
        assert_eq!(closing.end, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_cannot_close_with_two_points() {
        let mut outline = OutlineBuilder::new();
        outline.add_point(Point::new(0.0, 0.0));
        outline.add_point(Point::new(120.0, 0.0));
        outline.add_point(Point::new(3.0, 2.0));
        assert!(!outline.is_closed());
        // The click became an ordinary vertex on the anchor.
        assert_eq!(outline.points().len(), 3);
    }

    #[test]
    fn test_closed_outline_is_immutable() {
        let mut outline = square();
        outline.add_point(Point::new(0.0, 0.0));
        assert!(outline.is_closed());

        assert!(!outline.add_point(Point::new(400.0, 400.0)));
        assert!(!outline.undo_last_point());
        outline.update_preview(Point::new(10.0, 10.0));
        assert_eq!(outline.preview(), None);
        assert_eq!(outline.points().len(), 4);
        assert_eq!(outline.segments().len(), 4);
    }

    #[test]
    fn test_undo_last_point() {
        let mut outline = OutlineBuilder::new();
        assert!(!outline.undo_last_point());
        outline.add_point(Point::new(0.0, 0.0));
        outline.add_point(Point::new(120.0, 0.0));
        assert!(outline.undo_last_point());
        assert_eq!(outline.points().len(), 1);
        assert!(outline.segments().is_empty());
        assert!(outline.undo_last_point());
        assert!(outline.points().is_empty());
    }

    #[test]
    fn test_preview_is_snapped() {
        let mut outline = OutlineBuilder::new();
        outline.update_preview(Point::new(61.0, 19.0));
        assert_eq!(outline.preview(), Some(Point::new(80.0, 0.0)));
    }

    #[test]
    fn test_off_surface_point_rejected() {
        let mut outline = OutlineBuilder::new();
        assert!(!outline.add_point(Point::new(-30.0, 10.0)));
        assert!(outline.points().is_empty());
    }

    #[test]
    fn test_reset_reopens() {
        let mut outline = square();
        outline.add_point(Point::new(0.0, 0.0));
        outline.reset();
        assert!(!outline.is_closed());
        assert!(outline.points().is_empty());
        assert!(outline.segments().is_empty());
        assert!(outline.add_point(Point::new(40.0, 40.0)));
    }
}
