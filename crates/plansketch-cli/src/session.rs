//! Recorded editing sessions and their replay through the editor.

use plansketch_core::{
    ConfigError, DrawTool, EngineConfig, FloorPlanEditor, KeyCommand, ObjectKind, PointerEvent,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Step {step}: no {what} at index {index}")]
    UnknownIndex {
        step: usize,
        what: &'static str,
        index: usize,
    },
}

/// Layer panel actions on a sketch shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerAction {
    ToggleVisibility,
    ToggleLock,
    Up,
    Down,
    Rename(String),
    Delete,
}

/// One recorded host action. Entities are addressed by their index in the
/// owning collection, since ids are generated fresh on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionStep {
    Pointer { event: PointerEvent },
    Key {
        command: KeyCommand,
        #[serde(default)]
        text_focused: bool,
    },
    NextPhase,
    Reset,
    SketchMode { enabled: bool },
    Tool { tool: DrawTool },
    AddObject { kind: ObjectKind },
    PlaceObject { kind: ObjectKind, x: f64, y: f64 },
    Rotate { index: usize, degrees: f64 },
    FixObject { index: usize },
    AddLabel { x: f64, y: f64 },
    PlaceLabel { x: f64, y: f64 },
    EditLabel { index: usize, text: String },
    FixLabel { index: usize },
    Layer { index: usize, action: LayerAction },
    ClearSketch,
}

/// A recorded sequence of host actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Apply every step in order. Stops at the first step that names a
    /// missing entity.
    pub fn replay(&self, editor: &mut FloorPlanEditor) -> Result<(), SessionError> {
        for (step_no, step) in self.steps.iter().enumerate() {
            log::debug!("step {step_no}: {step:?}");
            apply(editor, step_no, step)?;
        }
        Ok(())
    }
}

/// Load an engine config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, SessionError> {
    match path {
        Some(path) => Ok(EngineConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(EngineConfig::default()),
    }
}

fn apply(
    editor: &mut FloorPlanEditor,
    step_no: usize,
    step: &SessionStep,
) -> Result<(), SessionError> {
    let missing = |what, index| SessionError::UnknownIndex {
        step: step_no,
        what,
        index,
    };

    match step {
        SessionStep::Pointer { event } => editor.handle_pointer(*event),
        SessionStep::Key {
            command,
            text_focused,
        } => {
            editor.handle_key(*command, *text_focused);
        }
        SessionStep::NextPhase => {
            if !editor.next_phase() {
                log::warn!("step {step_no}: cannot leave {:?}", editor.phase());
            }
        }
        SessionStep::Reset => editor.reset(),
        SessionStep::SketchMode { enabled } => editor.set_sketch_mode(*enabled),
        SessionStep::Tool { tool } => editor.drawing_mut().set_tool(*tool),
        SessionStep::AddObject { kind } => {
            let surface = editor.config().surface;
            editor.objects_mut().add(*kind, surface.width, surface.height);
        }
        SessionStep::PlaceObject { kind, x, y } => {
            editor.objects_mut().place(*kind, *x, *y);
        }
        SessionStep::Rotate { index, degrees } => {
            let id = object_id(editor, *index).ok_or_else(|| missing("object", *index))?;
            editor.objects_mut().set_rotation(id, *degrees);
        }
        SessionStep::FixObject { index } => {
            let id = object_id(editor, *index).ok_or_else(|| missing("object", *index))?;
            editor.objects_mut().fix_object(id);
        }
        SessionStep::AddLabel { x, y } => {
            editor.labels_mut().add(*x, *y);
        }
        SessionStep::PlaceLabel { x, y } => {
            editor.labels_mut().place(*x, *y);
        }
        SessionStep::EditLabel { index, text } => {
            let id = label_id(editor, *index).ok_or_else(|| missing("label", *index))?;
            editor.labels_mut().update_text(id, text.as_str());
        }
        SessionStep::FixLabel { index } => {
            let id = label_id(editor, *index).ok_or_else(|| missing("label", *index))?;
            editor.labels_mut().fix_label(id);
        }
        SessionStep::Layer { index, action } => {
            let id = editor
                .drawing()
                .shapes()
                .get(*index)
                .map(|s| s.id())
                .ok_or_else(|| missing("shape", *index))?;
            let drawing = editor.drawing_mut();
            match action {
                LayerAction::ToggleVisibility => drawing.toggle_visibility(id),
                LayerAction::ToggleLock => drawing.toggle_lock(id),
                LayerAction::Up => {
                    drawing.move_layer_up(id);
                }
                LayerAction::Down => {
                    drawing.move_layer_down(id);
                }
                LayerAction::Rename(name) => drawing.rename(id, name.as_str()),
                LayerAction::Delete => drawing.delete_shape(id),
            }
        }
        SessionStep::ClearSketch => editor.drawing_mut().clear_all(),
    }
    Ok(())
}

fn object_id(editor: &FloorPlanEditor, index: usize) -> Option<plansketch_core::ObjectId> {
    editor.objects().objects().get(index).map(|o| o.id())
}

fn label_id(editor: &FloorPlanEditor, index: usize) -> Option<plansketch_core::LabelId> {
    editor.labels().labels().get(index).map(|l| l.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use plansketch_core::Phase;
    use std::io::Write;

    /// Down, moves, then up along `points`.
    fn pointer_path(points: &[(f64, f64)]) -> Vec<SessionStep> {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return Vec::new();
        };
        let mut steps = vec![SessionStep::Pointer {
            event: PointerEvent::Down(Point::new(x0, y0)),
        }];
        let mut last = Point::new(x0, y0);
        for &(x, y) in rest {
            last = Point::new(x, y);
            steps.push(SessionStep::Pointer {
                event: PointerEvent::Move(last),
            });
        }
        steps.push(SessionStep::Pointer {
            event: PointerEvent::Up(last),
        });
        steps
    }

    const ROOM: &str = r#"{
        "steps": [
            { "op": "pointer", "event": { "down": { "x": 0, "y": 0 } } },
            { "op": "pointer", "event": { "down": { "x": 160, "y": 0 } } },
            { "op": "pointer", "event": { "down": { "x": 160, "y": 160 } } },
            { "op": "pointer", "event": { "down": { "x": 0, "y": 160 } } },
            { "op": "pointer", "event": { "down": { "x": 3, "y": 4 } } },
            { "op": "next_phase" },
            { "op": "place_object", "kind": "door", "x": 80, "y": 80 },
            { "op": "rotate", "index": 0, "degrees": 90 },
            { "op": "fix_object", "index": 0 },
            { "op": "next_phase" },
            { "op": "place_label", "x": 100, "y": 100 },
            { "op": "edit_label", "index": 0, "text": "Kitchen" },
            { "op": "key", "command": "delete", "text_focused": true }
        ]
    }"#;

    #[test]
    fn test_replay_room_session() {
        let session = Session::from_json(ROOM).unwrap();
        let mut editor = FloorPlanEditor::new();
        session.replay(&mut editor).unwrap();

        assert_eq!(editor.phase(), Phase::Labels);
        assert!(editor.outline().is_closed());
        let door = &editor.objects().objects()[0];
        assert!(door.fixed);
        assert!((door.rotation - 90.0).abs() < f64::EPSILON);
        assert_eq!(editor.labels().labels()[0].text, "Kitchen");
    }

    #[test]
    fn test_sketch_session_with_layers() {
        let mut steps = vec![
            SessionStep::SketchMode { enabled: true },
            SessionStep::Tool {
                tool: DrawTool::Rect,
            },
        ];
        steps.extend(pointer_path(&[(10.0, 10.0), (60.0, 60.0)]));
        steps.extend(pointer_path(&[(100.0, 100.0), (160.0, 120.0)]));
        steps.push(SessionStep::Layer {
            index: 0,
            action: LayerAction::Rename("Sofa".into()),
        });
        steps.push(SessionStep::Layer {
            index: 0,
            action: LayerAction::Up,
        });
        let session = Session { steps };

        let mut editor = FloorPlanEditor::new();
        session.replay(&mut editor).unwrap();
        let names: Vec<_> = editor
            .drawing()
            .shapes()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rectangle 2", "Sofa"]);
    }

    #[test]
    fn test_unknown_index_is_reported() {
        let session = Session {
            steps: vec![SessionStep::FixLabel { index: 3 }],
        };
        let mut editor = FloorPlanEditor::new();
        let err = session.replay(&mut editor).unwrap_err();
        assert!(matches!(
            err,
            SessionError::UnknownIndex {
                step: 0,
                what: "label",
                index: 3
            }
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Session::from_json(r#"{ "steps": [ { "op": "fly" } ] }"#),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 20, "history_capacity": 5 }}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.history_capacity, 5);
        assert!((config.handle_size - 12.0).abs() < f64::EPSILON);

        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_size": 50, "max_size": 10 }}"#).unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(SessionError::Config(ConfigError::InvertedSizeBounds { .. }))
        ));
    }
}
