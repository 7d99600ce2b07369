//! Pointer and keyboard events delivered by the host front end.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Pointer left the surface. Ends any gesture like `Up`.
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => Some(*p),
            PointerEvent::Leave => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editing commands bound to keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCommand {
    Delete,
    Undo,
    Redo,
}

impl KeyCommand {
    /// Map a key name plus modifiers to a command.
    ///
    /// Delete/Backspace delete, Ctrl+Z undoes, Ctrl+Shift+Z and Ctrl+Y redo.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        match key {
            "Delete" | "Backspace" if !modifiers.command() => Some(KeyCommand::Delete),
            "z" | "Z" if modifiers.command() && modifiers.shift => Some(KeyCommand::Redo),
            "z" | "Z" if modifiers.command() => Some(KeyCommand::Undo),
            "y" | "Y" if modifiers.command() => Some(KeyCommand::Redo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        let none = Modifiers::default();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        };
        let cmd = Modifiers {
            meta: true,
            ..Default::default()
        };

        assert_eq!(KeyCommand::from_key("Delete", none), Some(KeyCommand::Delete));
        assert_eq!(KeyCommand::from_key("Backspace", none), Some(KeyCommand::Delete));
        assert_eq!(KeyCommand::from_key("z", ctrl), Some(KeyCommand::Undo));
        assert_eq!(KeyCommand::from_key("z", cmd), Some(KeyCommand::Undo));
        assert_eq!(KeyCommand::from_key("Z", ctrl_shift), Some(KeyCommand::Redo));
        assert_eq!(KeyCommand::from_key("y", ctrl), Some(KeyCommand::Redo));
        assert_eq!(KeyCommand::from_key("z", none), None);
        assert_eq!(KeyCommand::from_key("q", ctrl), None);
    }

    #[test]
    fn test_pointer_event_json() {
        let events: Vec<PointerEvent> =
            serde_json::from_str(r#"[{"down":{"x":1.0,"y":2.0}},"leave"]"#).unwrap();
        assert_eq!(events[0], PointerEvent::Down(Point::new(1.0, 2.0)));
        assert_eq!(events[0].position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(events[1], PointerEvent::Leave);
        assert_eq!(events[1].position(), None);
    }
}
