//! PlanSketch Core Library
//!
//! Geometry and interaction engine for the PlanSketch floor-plan editor:
//! outline tracing, placed symbols, labels, freehand sketching and history.

pub mod config;
pub mod drawing;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod labels;
pub mod objects;
pub mod outline;
pub mod shapes;
pub mod tools;

pub use config::{ConfigError, EngineConfig};
pub use drawing::DrawingEngine;
pub use editor::{CursorHint, FloorPlanEditor, Phase, Scene};
pub use geometry::{Frame, distance_to_segment, local_to_world, snap, snap_point, world_to_local};
pub use history::History;
pub use input::{KeyCommand, Modifiers, PointerEvent};
pub use labels::{LabelBox, LabelEngine, LabelId};
pub use objects::{HitMode, ObjectEngine, ObjectHit, ObjectId, ObjectKind, PlacedObject};
pub use outline::{OutlineBuilder, OutlineSegment};
pub use shapes::{EraserStroke, Shape, ShapeGeometry, ShapeId, ShapeKind, ShapeTrait};
pub use tools::{DrawTool, Gesture};
