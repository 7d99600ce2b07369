//! Freehand-mode tools and the per-gesture state they drive.

use crate::shapes::{ShapeId, ShapeKind};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Available freehand-mode tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawTool {
    Rect,
    Circle,
    Line,
    #[default]
    Free,
    Move,
    Eraser,
}

impl DrawTool {
    /// Shape kind created by this tool, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            DrawTool::Rect => Some(ShapeKind::Rect),
            DrawTool::Circle => Some(ShapeKind::Circle),
            DrawTool::Line => Some(ShapeKind::Line),
            DrawTool::Free => Some(ShapeKind::Free),
            DrawTool::Move | DrawTool::Eraser => None,
        }
    }
}

/// The eraser stroke currently being extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveStroke {
    pub shape_id: ShapeId,
    pub stroke_index: usize,
}

/// State of one pointer gesture. Set on down, consulted on move, and
/// reset to `Idle` on up or leave.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// A drawing tool is sizing a freshly created shape.
    Drawing { id: ShapeId },
    /// The move tool is dragging a shape; `offset` is pointer minus shape origin.
    Dragging { id: ShapeId, offset: Vec2 },
    /// The eraser is down. `active` is `None` while the pointer is over no shape.
    Erasing {
        active: Option<ActiveStroke>,
        history_pushed: bool,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}
