//! Freehand drawing engine: shape creation, moving, layers and erasing.

use crate::config::EngineConfig;
use crate::history::History;
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeTrait};
use crate::tools::{ActiveStroke, DrawTool, Gesture};
use kurbo::Point;

/// Owns the freehand shapes, their undo history and the active gesture.
///
/// Every mutating operation snapshots the shape list first, so undo restores
/// it verbatim. Erasing only appends cutout strokes, never touches geometry.
#[derive(Debug, Clone)]
pub struct DrawingEngine {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    tool: DrawTool,
    gesture: Gesture,
    history: History<Vec<Shape>>,
    /// Per-engine counter for generated layer names.
    names_issued: usize,
    config: EngineConfig,
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            shapes: Vec::new(),
            selected: None,
            tool: DrawTool::default(),
            gesture: Gesture::Idle,
            history: History::with_capacity(config.history_capacity),
            names_issued: 0,
            config: config.clone(),
        }
    }

    /// Shapes in paint order (topmost last).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<ShapeId>) {
        self.selected = id.filter(|&id| self.get(id).is_some());
    }

    pub fn tool(&self) -> DrawTool {
        self.tool
    }

    /// Switch tools. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: DrawTool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// Stroke width renderers should use for shape outlines.
    pub fn stroke_width(&self) -> f64 {
        self.config.stroke_width
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn push_history(&mut self) {
        self.history.push(&self.shapes);
    }

    /// Topmost visible, unlocked shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        let tolerance = self.config.shape_hit_tolerance;
        self.shapes
            .iter()
            .rev()
            .filter(|s| s.is_interactive())
            .find(|s| s.hit_test(point, tolerance))
            .map(|s| s.id)
    }

    fn next_name(&mut self, kind: ShapeKind) -> String {
        self.names_issued += 1;
        format!("{} {}", kind.display_name(), self.names_issued)
    }

    // ── Pointer events ─────────────────────────────────────────────────────

    /// Start a gesture with the current tool. Off-surface presses are ignored.
    pub fn pointer_down(&mut self, point: Point) {
        // A new press always ends the previous gesture, even off the surface
        self.gesture = Gesture::Idle;
        if !self.config.on_surface(point) {
            log::trace!("pointer down {point:?} off surface, ignored");
            return;
        }

        match self.tool {
            DrawTool::Move => self.begin_move(point),
            DrawTool::Eraser => self.begin_erase(point),
            DrawTool::Rect | DrawTool::Circle | DrawTool::Line | DrawTool::Free => {
                if let Some(kind) = self.tool.shape_kind() {
                    self.begin_shape(kind, point);
                }
            }
        }
    }

    /// Continue the current gesture. No-op while idle.
    pub fn pointer_move(&mut self, point: Point) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { id } => {
                if let Some(shape) = self.get_mut(id) {
                    shape.geometry.extend_to(point);
                }
            }
            Gesture::Dragging { id, offset } => {
                if let Some(shape) = self.get_mut(id) {
                    let delta = (point - offset) - shape.origin();
                    shape.translate(delta);
                }
            }
            Gesture::Erasing {
                active,
                history_pushed,
            } => self.continue_erase(point, active, history_pushed),
        }
    }

    /// End the current gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Pointer left the surface: same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    fn begin_shape(&mut self, kind: ShapeKind, point: Point) {
        self.push_history();
        let name = self.next_name(kind);
        let shape = Shape::new(name, kind.anchored_at(point));
        let id = shape.id;
        log::debug!("drawing {kind:?} {id} from {point:?}");
        self.shapes.push(shape);
        self.selected = Some(id);
        self.gesture = Gesture::Drawing { id };
    }

    fn begin_move(&mut self, point: Point) {
        let Some(id) = self.shape_at(point) else {
            self.selected = None;
            return;
        };
        let Some(origin) = self.get(id).map(Shape::origin) else {
            return;
        };
        self.selected = Some(id);
        self.push_history();
        self.gesture = Gesture::Dragging {
            id,
            offset: point - origin,
        };
    }

    fn begin_erase(&mut self, point: Point) {
        let mut active = None;
        let mut history_pushed = false;
        if let Some(id) = self.shape_at(point) {
            self.push_history();
            history_pushed = true;
            active = self.start_stroke(id, point);
        }
        self.gesture = Gesture::Erasing {
            active,
            history_pushed,
        };
    }

    fn continue_erase(&mut self, point: Point, active: Option<ActiveStroke>, history_pushed: bool) {
        let hit = self.shape_at(point);
        let (active, history_pushed) = match (active, hit) {
            (Some(stroke), Some(id)) if stroke.shape_id == id => {
                if let Some(shape) = self.get_mut(id) {
                    shape.extend_eraser_stroke(stroke.stroke_index, point);
                }
                (Some(stroke), history_pushed)
            }
            (_, Some(id)) => {
                // One snapshot per gesture, however many shapes it crosses
                if !history_pushed {
                    self.push_history();
                }
                (self.start_stroke(id, point), true)
            }
            (_, None) => (None, history_pushed),
        };
        self.gesture = Gesture::Erasing {
            active,
            history_pushed,
        };
    }

    fn start_stroke(&mut self, id: ShapeId, point: Point) -> Option<ActiveStroke> {
        let width = self.config.eraser_width;
        let shape = self.get_mut(id)?;
        let stroke_index = shape.begin_eraser_stroke(point, width);
        Some(ActiveStroke {
            shape_id: id,
            stroke_index,
        })
    }

    // ── History ────────────────────────────────────────────────────────────

    /// Restore the state before the last mutation. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.shapes) else {
            return false;
        };
        self.restore(previous);
        log::debug!("undo ({} shapes)", self.shapes.len());
        true
    }

    /// Re-apply the last undone mutation. Returns false if there was none.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.shapes) else {
            return false;
        };
        self.restore(next);
        log::debug!("redo ({} shapes)", self.shapes.len());
        true
    }

    fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.gesture = Gesture::Idle;
        if let Some(id) = self.selected {
            if self.get(id).is_none() {
                self.selected = None;
            }
        }
    }

    // ── Layer operations ───────────────────────────────────────────────────

    pub fn toggle_visibility(&mut self, id: ShapeId) {
        if self.get(id).is_none() {
            return;
        }
        self.push_history();
        if let Some(shape) = self.get_mut(id) {
            shape.visible = !shape.visible;
        }
    }

    pub fn toggle_lock(&mut self, id: ShapeId) {
        if self.get(id).is_none() {
            return;
        }
        self.push_history();
        if let Some(shape) = self.get_mut(id) {
            shape.locked = !shape.locked;
        }
    }

    /// Swap with the shape above (towards the top of the paint order).
    /// Returns false if the shape is already topmost or unknown.
    pub fn move_layer_up(&mut self, id: ShapeId) -> bool {
        // Only an actual swap records a snapshot
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.shapes.len() => {
                self.push_history();
                self.shapes.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap with the shape below. Returns false if already bottommost or unknown.
    pub fn move_layer_down(&mut self, id: ShapeId) -> bool {
        // Only an actual swap records a snapshot
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                self.push_history();
                self.shapes.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Rename a layer. Not recorded in history.
    pub fn rename(&mut self, id: ShapeId, name: impl Into<String>) {
        if let Some(shape) = self.get_mut(id) {
            shape.name = name.into();
        }
    }

    pub fn delete_shape(&mut self, id: ShapeId) {
        if self.get(id).is_none() {
            return;
        }
        self.push_history();
        self.shapes.retain(|s| s.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if !self.gesture.is_idle() {
            self.gesture = Gesture::Idle;
        }
    }

    /// Remove every shape as one undoable step.
    pub fn clear_all(&mut self) {
        if self.shapes.is_empty() {
            return;
        }
        self.push_history();
        self.shapes.clear();
        self.selected = None;
        self.gesture = Gesture::Idle;
    }
}
