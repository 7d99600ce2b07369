//! Floor-plan editor: routes host input to the engine of the active phase.

use crate::config::EngineConfig;
use crate::drawing::DrawingEngine;
use crate::input::{KeyCommand, PointerEvent};
use crate::labels::{LabelBox, LabelEngine, LabelId};
use crate::objects::{HitMode, ObjectEngine, ObjectId, PlacedObject};
use crate::outline::{OutlineBuilder, OutlineSegment};
use crate::shapes::{Shape, ShapeId};
use crate::tools::DrawTool;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Step of the floor-plan workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Outline,
    Objects,
    Labels,
    Finished,
}

impl Phase {
    fn next(self) -> Option<Phase> {
        match self {
            Phase::Outline => Some(Phase::Objects),
            Phase::Objects => Some(Phase::Labels),
            Phase::Labels => Some(Phase::Finished),
            Phase::Finished => None,
        }
    }
}

/// Cursor a host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorHint {
    Default,
    Move,
    Resize,
    Crosshair,
}

/// Read-only snapshot of every collection, for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Scene<'a> {
    pub phase: Phase,
    pub sketch_mode: bool,
    pub outline_points: &'a [Point],
    pub outline_segments: &'a [OutlineSegment],
    pub outline_closed: bool,
    pub preview: Option<Point>,
    pub objects: &'a [PlacedObject],
    pub labels: &'a [LabelBox],
    pub shapes: &'a [Shape],
    pub selected_object: Option<ObjectId>,
    pub selected_label: Option<LabelId>,
    pub selected_shape: Option<ShapeId>,
    pub stroke_width: f64,
}

/// Owns one engine per concern plus the workflow phase.
#[derive(Debug, Clone)]
pub struct FloorPlanEditor {
    phase: Phase,
    sketch_mode: bool,
    outline: OutlineBuilder,
    objects: ObjectEngine,
    labels: LabelEngine,
    drawing: DrawingEngine,
    config: EngineConfig,
}

impl Default for FloorPlanEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlanEditor {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            phase: Phase::default(),
            sketch_mode: false,
            outline: OutlineBuilder::with_config(config),
            objects: ObjectEngine::with_config(config),
            labels: LabelEngine::with_config(config),
            drawing: DrawingEngine::with_config(config),
            config: config.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn outline(&self) -> &OutlineBuilder {
        &self.outline
    }

    pub fn outline_mut(&mut self) -> &mut OutlineBuilder {
        &mut self.outline
    }

    pub fn objects(&self) -> &ObjectEngine {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectEngine {
        &mut self.objects
    }

    pub fn labels(&self) -> &LabelEngine {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut LabelEngine {
        &mut self.labels
    }

    pub fn drawing(&self) -> &DrawingEngine {
        &self.drawing
    }

    pub fn drawing_mut(&mut self) -> &mut DrawingEngine {
        &mut self.drawing
    }

    pub fn is_sketch_mode(&self) -> bool {
        self.sketch_mode
    }

    /// Route pointer input to the drawing engine regardless of phase.
    pub fn set_sketch_mode(&mut self, enabled: bool) {
        if self.sketch_mode == enabled {
            return;
        }
        self.end_gestures();
        self.sketch_mode = enabled;
        log::debug!("sketch mode {}", if enabled { "on" } else { "off" });
    }

    fn end_gestures(&mut self) {
        self.objects.end_drag();
        self.labels.end_drag();
        self.drawing.pointer_up();
    }

    /// Whether [`FloorPlanEditor::next_phase`] would advance.
    pub fn can_advance(&self) -> bool {
        match self.phase {
            Phase::Outline => self.outline.is_closed(),
            Phase::Objects | Phase::Labels => true,
            Phase::Finished => false,
        }
    }

    /// Move to the next workflow step. The outline must be closed first.
    pub fn next_phase(&mut self) -> bool {
        if !self.can_advance() {
            log::trace!("cannot leave {:?} yet", self.phase);
            return false;
        }
        let Some(next) = self.phase.next() else {
            return false;
        };
        self.end_gestures();
        self.objects.select(None);
        self.labels.select(None);
        self.phase = next;
        log::debug!("phase -> {next:?}");
        true
    }

    /// Drop everything and start over from the outline.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.objects.clear();
        self.labels.clear();
        self.drawing = DrawingEngine::with_config(&self.config);
        self.phase = Phase::Outline;
        log::debug!("editor reset");
    }

    /// Dispatch a pointer event to the engine that owns the current phase.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.sketch_mode {
            match event {
                PointerEvent::Down(p) => self.drawing.pointer_down(p),
                PointerEvent::Move(p) => self.drawing.pointer_move(p),
                PointerEvent::Up(_) => self.drawing.pointer_up(),
                PointerEvent::Leave => self.drawing.pointer_leave(),
            }
            return;
        }

        match (self.phase, event) {
            (Phase::Outline, PointerEvent::Down(p)) => {
                self.outline.add_point(p);
            }
            (Phase::Outline, PointerEvent::Move(p)) => self.outline.update_preview(p),
            (Phase::Outline, PointerEvent::Up(_) | PointerEvent::Leave) => {}

            (Phase::Objects, PointerEvent::Down(p)) => {
                self.objects.start_drag(p);
            }
            (Phase::Objects, PointerEvent::Move(p)) => self.objects.move_drag(p),
            (Phase::Objects, PointerEvent::Up(_)) => self.objects.end_drag(),
            (Phase::Objects, PointerEvent::Leave) => self.objects.cancel_drag(),

            (Phase::Labels, PointerEvent::Down(p)) => {
                if !self.labels.start_drag(p) {
                    self.labels.select(None);
                }
            }
            (Phase::Labels, PointerEvent::Move(p)) => self.labels.move_drag(p),
            (Phase::Labels, PointerEvent::Up(_) | PointerEvent::Leave) => self.labels.end_drag(),

            (Phase::Finished, _) => log::trace!("pointer {event:?} ignored, plan finished"),
        }
    }

    /// Apply a keyboard command. Returns true if something changed.
    ///
    /// Delete is ignored while a text field has focus so typing in it does
    /// not remove the selection.
    pub fn handle_key(&mut self, command: KeyCommand, text_focused: bool) -> bool {
        match command {
            KeyCommand::Delete if text_focused => false,
            KeyCommand::Delete => self.delete_selected(),
            KeyCommand::Undo if self.sketch_mode => self.drawing.undo(),
            KeyCommand::Redo if self.sketch_mode => self.drawing.redo(),
            KeyCommand::Undo if self.phase == Phase::Outline => self.outline.undo_last_point(),
            KeyCommand::Undo | KeyCommand::Redo => false,
        }
    }

    fn delete_selected(&mut self) -> bool {
        if self.sketch_mode {
            let Some(id) = self.drawing.selected_id() else {
                return false;
            };
            self.drawing.delete_shape(id);
            return true;
        }
        match self.phase {
            Phase::Objects => match self.objects.selected_id() {
                Some(id) => {
                    self.objects.delete_object(id);
                    true
                }
                None => false,
            },
            Phase::Labels => match self.labels.selected_id() {
                Some(id) => {
                    self.labels.delete_label(id);
                    true
                }
                None => false,
            },
            Phase::Outline | Phase::Finished => false,
        }
    }

    /// Cursor to show with the pointer at `point`.
    pub fn hover_cursor(&self, point: Point) -> CursorHint {
        if self.sketch_mode {
            return match self.drawing.tool() {
                DrawTool::Move if self.drawing.shape_at(point).is_some() => CursorHint::Move,
                DrawTool::Move => CursorHint::Default,
                _ => CursorHint::Crosshair,
            };
        }
        match self.phase {
            Phase::Outline if !self.outline.is_closed() => CursorHint::Crosshair,
            Phase::Objects => {
                if self.objects.is_on_handle(point) {
                    return CursorHint::Resize;
                }
                match self.objects.hit_test(point) {
                    Some(hit) if hit.mode == HitMode::Resize => CursorHint::Resize,
                    Some(_) => CursorHint::Move,
                    None => CursorHint::Default,
                }
            }
            Phase::Labels if self.labels.hit_test(point).is_some() => CursorHint::Move,
            Phase::Outline | Phase::Labels | Phase::Finished => CursorHint::Default,
        }
    }

    /// Snapshot of everything a renderer needs.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            phase: self.phase,
            sketch_mode: self.sketch_mode,
            outline_points: self.outline.points(),
            outline_segments: self.outline.segments(),
            outline_closed: self.outline.is_closed(),
            preview: self.outline.preview(),
            objects: self.objects.objects(),
            labels: self.labels.labels(),
            shapes: self.drawing.shapes(),
            selected_object: self.objects.selected_id(),
            selected_label: self.labels.selected_id(),
            selected_shape: self.drawing.selected_id(),
            stroke_width: self.drawing.stroke_width(),
        }
    }
}
