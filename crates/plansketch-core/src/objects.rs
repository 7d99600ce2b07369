//! Placed symbols: rotatable rectangle-bounded furniture and openings.
//!
//! Every object is an oriented rectangle. `position` is the unrotated
//! top-left corner and `rotation` (degrees) pivots about the center, so all
//! hit-testing and resizing goes through [`Frame`].

use crate::config::EngineConfig;
use crate::geometry::{round_to, world_to_local, Frame};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed objects.
pub type ObjectId = Uuid;

/// Placement positions are rounded to this step.
const PLACEMENT_STEP: f64 = 10.0;

/// Symbol kinds that can be placed on the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Rect,
    Circle,
    Line,
    Door,
    Window,
}

impl ObjectKind {
    /// Size a freshly placed object starts with.
    pub fn default_size(self) -> Size {
        match self {
            ObjectKind::Rect => Size::new(100.0, 80.0),
            ObjectKind::Circle => Size::new(80.0, 80.0),
            ObjectKind::Line => Size::new(120.0, 4.0),
            ObjectKind::Door => Size::new(80.0, 80.0),
            ObjectKind::Window => Size::new(80.0, 24.0),
        }
    }

    /// Display name given to new objects.
    pub fn default_label(self) -> &'static str {
        match self {
            ObjectKind::Rect => "Rectangle",
            ObjectKind::Circle => "Circle",
            ObjectKind::Line => "Line",
            ObjectKind::Door => "Door",
            ObjectKind::Window => "Window",
        }
    }
}

/// An oriented symbol on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub(crate) id: ObjectId,
    pub kind: ObjectKind,
    pub label: String,
    /// Unrotated top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise on screen, about the center.
    pub rotation: f64,
    /// Committed objects no longer respond to pointer interaction.
    pub fixed: bool,
}

impl PlacedObject {
    /// Create an object of `kind` with its default size at `position`.
    pub fn new(kind: ObjectKind, position: Point) -> Self {
        let size = kind.default_size();
        Self {
            id: Uuid::new_v4(),
            kind,
            label: kind.default_label().to_string(),
            position,
            width: size.width,
            height: size.height,
            rotation: 0.0,
            fixed: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.frame().center()
    }

    /// Oriented frame used for every local/world conversion.
    pub fn frame(&self) -> Frame {
        Frame::new(self.position, self.size(), self.rotation)
    }

    /// Whether a local-frame point lies in the resize handle square.
    fn in_handle(&self, local: Point, handle: f64) -> bool {
        local.x >= self.width - handle
            && local.x <= self.width + handle
            && local.y >= self.height - handle
            && local.y <= self.height + handle
    }

    /// Whether a local-frame point grabs the body of the object.
    fn in_body(&self, local: Point, line_margin: f64) -> bool {
        let in_bounds =
            local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height;
        match self.kind {
            ObjectKind::Line => {
                in_bounds
                    || (local.x >= -line_margin
                        && local.x <= self.width + line_margin
                        && (local.y - self.height / 2.0).abs() <= line_margin)
            }
            ObjectKind::Rect | ObjectKind::Circle | ObjectKind::Door | ObjectKind::Window => {
                in_bounds
            }
        }
    }
}

/// What a pointer-down on an object will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitMode {
    Move,
    Resize,
}

/// Result of hit-testing the object stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHit {
    pub id: ObjectId,
    pub mode: HitMode,
}

/// State captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub id: ObjectId,
    pub mode: HitMode,
    /// Pointer minus object origin, for moves.
    pub offset: Vec2,
    /// Size before the drag, for resizes.
    pub original_size: Size,
    /// World pointer at drag start.
    pub start: Point,
    /// Object rotation at drag start, in radians.
    pub rotation: f64,
}

/// Per-gesture state of the object engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ObjectGesture {
    #[default]
    Idle,
    Dragging(DragState),
}

/// Owns the placed objects and their selection/drag state.
#[derive(Debug, Clone)]
pub struct ObjectEngine {
    objects: Vec<PlacedObject>,
    selected: Option<ObjectId>,
    gesture: ObjectGesture,
    config: EngineConfig,
}

impl Default for ObjectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectEngine {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            objects: Vec::new(),
            selected: None,
            gesture: ObjectGesture::Idle,
            config: config.clone(),
        }
    }

    /// Objects in paint order (topmost last).
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&PlacedObject> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selected = id.filter(|&id| self.get(id).is_some());
    }

    pub fn gesture(&self) -> &ObjectGesture {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, ObjectGesture::Dragging(_))
    }

    fn insert(&mut self, object: PlacedObject) -> ObjectId {
        let id = object.id;
        log::debug!("placed {:?} {id} at {:?}", object.kind, object.position);
        self.objects.push(object);
        self.selected = Some(id);
        id
    }

    /// Add an object centered on a canvas of the given size.
    pub fn add(&mut self, kind: ObjectKind, canvas_width: f64, canvas_height: f64) -> ObjectId {
        self.place_centered(kind, Point::new(canvas_width / 2.0, canvas_height / 2.0))
    }

    /// Place an object centered on a drop point.
    pub fn place(&mut self, kind: ObjectKind, x: f64, y: f64) -> ObjectId {
        self.place_centered(kind, Point::new(x, y))
    }

    fn place_centered(&mut self, kind: ObjectKind, center: Point) -> ObjectId {
        let size = kind.default_size();
        let position = Point::new(
            round_to(center.x - size.width / 2.0, PLACEMENT_STEP),
            round_to(center.y - size.height / 2.0, PLACEMENT_STEP),
        );
        self.insert(PlacedObject::new(kind, position))
    }

    /// Find the topmost interactive object under `point`.
    ///
    /// The resize handle wins over the body of the same object, and the
    /// handle square may overshoot the object's edge.
    pub fn hit_test(&self, point: Point) -> Option<ObjectHit> {
        let handle = self.config.handle_size;
        let margin = self.config.line_hit_margin;
        self.objects.iter().rev().filter(|o| !o.fixed).find_map(|o| {
            let local = o.frame().to_local(point);
            if o.in_handle(local, handle) {
                Some(ObjectHit {
                    id: o.id,
                    mode: HitMode::Resize,
                })
            } else if o.in_body(local, margin) {
                Some(ObjectHit {
                    id: o.id,
                    mode: HitMode::Move,
                })
            } else {
                None
            }
        })
    }

    /// Begin a move or resize. A miss clears the selection.
    pub fn start_drag(&mut self, point: Point) -> Option<ObjectHit> {
        let Some(hit) = self.hit_test(point) else {
            self.selected = None;
            self.gesture = ObjectGesture::Idle;
            return None;
        };
        let object = self.get(hit.id)?;
        let state = DragState {
            id: hit.id,
            mode: hit.mode,
            offset: point - object.position,
            original_size: object.size(),
            start: point,
            rotation: object.rotation.to_radians(),
        };
        log::debug!("object drag start {:?} on {}", hit.mode, hit.id);
        self.selected = Some(hit.id);
        self.gesture = ObjectGesture::Dragging(state);
        Some(hit)
    }

    /// Continue the active drag. No-op without one.
    pub fn move_drag(&mut self, point: Point) {
        let ObjectGesture::Dragging(state) = self.gesture else {
            return;
        };
        let config = &self.config;
        let Some(object) = self.objects.iter_mut().find(|o| o.id == state.id) else {
            return;
        };
        match state.mode {
            HitMode::Move => {
                object.position = point - state.offset;
            }
            HitMode::Resize => {
                // Resize along the object's own axes, not the screen's
                let local = world_to_local(point - state.start, state.rotation);
                object.width = config.clamp_size(state.original_size.width + local.x);
                object.height = config.clamp_size(state.original_size.height + local.y);
            }
        }
    }

    /// Finish the active drag.
    pub fn end_drag(&mut self) {
        self.gesture = ObjectGesture::Idle;
    }

    /// Pointer left the surface: treated as the end of the gesture.
    pub fn cancel_drag(&mut self) {
        self.end_drag();
    }

    /// Set an absolute rotation in degrees. Committed objects keep theirs.
    pub fn set_rotation(&mut self, id: ObjectId, degrees: f64) {
        if let Some(object) = self.get_mut(id).filter(|o| !o.fixed) {
            object.rotation = degrees;
        }
    }

    /// Whether `point` is over the selected object's resize handle.
    pub fn is_on_handle(&self, point: Point) -> bool {
        self.selected()
            .filter(|o| !o.fixed)
            .is_some_and(|o| o.in_handle(o.frame().to_local(point), self.config.handle_size))
    }

    /// Remove an object. Unknown ids are ignored.
    pub fn delete_object(&mut self, id: ObjectId) {
        self.objects.retain(|o| o.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if matches!(self.gesture, ObjectGesture::Dragging(s) if s.id == id) {
            self.gesture = ObjectGesture::Idle;
        }
    }

    /// Commit an object so it no longer responds to the pointer.
    pub fn fix_object(&mut self, id: ObjectId) {
        if let Some(object) = self.get_mut(id) {
            object.fixed = true;
            log::debug!("object {id} fixed");
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
        self.gesture = ObjectGesture::Idle;
    }
}
