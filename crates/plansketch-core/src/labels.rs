//! Draggable text labels. Axis-aligned, no rotation or resize.

use crate::config::EngineConfig;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for labels.
pub type LabelId = Uuid;

/// Text given to labels created with [`LabelEngine::add`].
pub const DEFAULT_LABEL_TEXT: &str = "Label";
/// Text given to labels dropped with [`LabelEngine::place`].
pub const PLACED_LABEL_TEXT: &str = "Text";
/// Drop point to label origin, so the cursor lands near the text's middle.
const PLACE_OFFSET: Vec2 = Vec2::new(40.0, 10.0);

/// A positioned text entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub(crate) id: LabelId,
    pub text: String,
    pub position: Point,
    pub fixed: bool,
}

impl LabelBox {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            position,
            fixed: false,
        }
    }

    pub fn id(&self) -> LabelId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LabelDrag {
    id: LabelId,
    offset: Vec2,
}

/// Owns the labels and their selection/drag state.
#[derive(Debug, Clone)]
pub struct LabelEngine {
    labels: Vec<LabelBox>,
    selected: Option<LabelId>,
    drag: Option<LabelDrag>,
    config: EngineConfig,
}

impl Default for LabelEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelEngine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            labels: Vec::new(),
            selected: None,
            drag: None,
            config: config.clone(),
        }
    }

    pub fn labels(&self) -> &[LabelBox] {
        &self.labels
    }

    pub fn get(&self, id: LabelId) -> Option<&LabelBox> {
        self.labels.iter().find(|l| l.id == id)
    }

    fn get_mut(&mut self, id: LabelId) -> Option<&mut LabelBox> {
        self.labels.iter_mut().find(|l| l.id == id)
    }

    pub fn selected_id(&self) -> Option<LabelId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<LabelId>) {
        self.selected = id.filter(|&id| self.get(id).is_some());
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Nominal hit box of a label; rendered width is not considered.
    pub fn hit_box(&self, label: &LabelBox) -> Rect {
        Rect::from_origin_size(label.position, self.config.label_box)
    }

    fn insert(&mut self, label: LabelBox) -> LabelId {
        let id = label.id;
        self.labels.push(label);
        self.selected = Some(id);
        id
    }

    /// Create a label with the default text at exactly `(x, y)`.
    pub fn add(&mut self, x: f64, y: f64) -> LabelId {
        self.insert(LabelBox::new(DEFAULT_LABEL_TEXT, Point::new(x, y)))
    }

    /// Create a label dropped at `(x, y)`.
    pub fn place(&mut self, x: f64, y: f64) -> LabelId {
        self.insert(LabelBox::new(PLACED_LABEL_TEXT, Point::new(x, y) - PLACE_OFFSET))
    }

    /// Topmost interactive label whose hit box contains `point` (edges included).
    pub fn hit_test(&self, point: Point) -> Option<LabelId> {
        self.labels
            .iter()
            .rev()
            .filter(|l| !l.fixed)
            .find(|l| {
                let r = self.hit_box(l);
                point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
            })
            .map(|l| l.id)
    }

    /// Begin dragging the label under `point`. Returns false on a miss so the
    /// caller can decide what to do with the selection.
    pub fn start_drag(&mut self, point: Point) -> bool {
        let Some(id) = self.hit_test(point) else {
            self.drag = None;
            return false;
        };
        let Some(label) = self.get(id) else {
            return false;
        };
        self.drag = Some(LabelDrag {
            id,
            offset: point - label.position,
        });
        self.selected = Some(id);
        true
    }

    /// Continue the active drag. No-op without one.
    pub fn move_drag(&mut self, point: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        if let Some(label) = self.get_mut(drag.id) {
            label.position = point - drag.offset;
        }
    }

    /// Finish (or abandon, on pointer leave) the active drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Replace a label's text. Committed labels keep theirs.
    pub fn update_text(&mut self, id: LabelId, text: impl Into<String>) {
        if let Some(label) = self.get_mut(id).filter(|l| !l.fixed) {
            label.text = text.into();
        }
    }

    /// Remove a label. Unknown ids are ignored.
    pub fn delete_label(&mut self, id: LabelId) {
        self.labels.retain(|l| l.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
    }

    /// Commit a label so it no longer responds to the pointer.
    pub fn fix_label(&mut self, id: LabelId) {
        if let Some(label) = self.get_mut(id) {
            label.fixed = true;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Remove every label.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.selected = None;
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_selects_with_default_text() {
        let mut engine = LabelEngine::new();
        let id = engine.add(10.0, 20.0);
        let label = engine.get(id).unwrap();
        assert_eq!(label.text, DEFAULT_LABEL_TEXT);
        assert_eq!(label.position, Point::new(10.0, 20.0));
        assert_eq!(engine.selected_id(), Some(id));
    }

    #[test]
    fn test_place_offsets_drop_point() {
        let mut engine = LabelEngine::new();
        let id = engine.place(100.0, 100.0);
        let label = engine.get(id).unwrap();
        assert_eq!(label.text, PLACED_LABEL_TEXT);
        assert_eq!(label.position, Point::new(60.0, 90.0));
    }

    #[test]
    fn test_hit_test_uses_fixed_box() {
        let mut engine = LabelEngine::new();
        let id = engine.add(0.0, 0.0);
        engine.update_text(id, "a much longer label than the nominal box would fit");
        assert_eq!(engine.hit_test(Point::new(160.0, 40.0)), Some(id));
        assert_eq!(engine.hit_test(Point::new(161.0, 20.0)), None);
        assert_eq!(engine.hit_test(Point::new(20.0, 41.0)), None);
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut engine = LabelEngine::new();
        let _below = engine.add(0.0, 0.0);
        let above = engine.add(50.0, 10.0);
        assert_eq!(engine.hit_test(Point::new(60.0, 20.0)), Some(above));
    }

    #[test]
    fn test_drag_moves_by_offset() {
        let mut engine = LabelEngine::new();
        let id = engine.add(100.0, 100.0);
        engine.select(None);

        assert!(engine.start_drag(Point::new(110.0, 105.0)));
        assert_eq!(engine.selected_id(), Some(id));
        engine.move_drag(Point::new(210.0, 305.0));
        engine.end_drag();
        assert_eq!(engine.get(id).unwrap().position, Point::new(200.0, 300.0));

        // Stale drag state does not survive the gesture.
        engine.move_drag(Point::new(0.0, 0.0));
        assert_eq!(engine.get(id).unwrap().position, Point::new(200.0, 300.0));
    }

    #[test]
    fn test_start_drag_miss_returns_false() {
        let mut engine = LabelEngine::new();
        let id = engine.add(100.0, 100.0);
        assert!(!engine.start_drag(Point::new(500.0, 500.0)));
        // Selection is left to the caller.
        assert_eq!(engine.selected_id(), Some(id));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_update_text() {
        let mut engine = LabelEngine::new();
        let id = engine.add(0.0, 0.0);
        engine.update_text(id, "Kitchen");
        assert_eq!(engine.get(id).unwrap().text, "Kitchen");
        engine.update_text(Uuid::new_v4(), "ignored");
        assert_eq!(engine.labels().len(), 1);
    }

    #[test]
    fn test_delete_label() {
        let mut engine = LabelEngine::new();
        let keep = engine.add(0.0, 0.0);
        let gone = engine.add(300.0, 300.0);
        engine.delete_label(gone);
        assert_eq!(engine.labels().len(), 1);
        assert_eq!(engine.labels()[0].id(), keep);
        assert_eq!(engine.selected_id(), None);
    }

    #[test]
    fn test_fixed_label_is_inert() {
        let mut engine = LabelEngine::new();
        let id = engine.add(0.0, 0.0);
        engine.fix_label(id);
        assert!(!engine.start_drag(Point::new(10.0, 10.0)));
        engine.update_text(id, "changed");
        assert_eq!(engine.get(id).unwrap().text, DEFAULT_LABEL_TEXT);
        // Deleting still works.
        engine.delete_label(id);
        assert!(engine.labels().is_empty());
    }
}
