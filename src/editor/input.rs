//! Backend-neutral input vocabulary the shell translates its events into.

/// Mouse buttons the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Apply the selected tile or tool.
    Primary,
    /// Erase.
    Secondary,
    /// Drag to pan.
    Middle,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Pan left.
    Left,
    /// Pan right.
    Right,
    /// Pan up.
    Up,
    /// Pan down.
    Down,
    /// Recenter, or a space while typing a note.
    Space,
    /// Commit the open note.
    Enter,
    /// Discard the open note.
    Escape,
    /// Delete the last character of the open note.
    Backspace,
    /// Zoom in about the canvas centre.
    ZoomIn,
    /// Zoom out about the canvas centre.
    ZoomOut,
    /// A printable character, already lower-cased by the shell for shortcuts.
    Char(char),
}

/// Modifier keys held with a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS.
    pub ctrl: bool,
    /// Either shift key.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    /// Ctrl alone.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
}

/// What the pointer is currently doing on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Gesture {
    Idle,
    Painting,
    Erasing,
    /// Middle-button pan; `anchor` is the last position that moved the camera.
    Dragging { anchor: macroquad::prelude::Vec2 },
}
