//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic [`EditorAction`]s. `key` follows
//! the DOM `KeyboardEvent.key` naming (`"z"`, `"Delete"`, `"ArrowUp"`).
//! On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.

/// Direction of an arrow-key nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Unit vector in model space (y grows downward).
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    ResetView,
    Delete,
    Duplicate,
    /// `large` when Shift is held
    Nudge {
        direction: NudgeDirection,
        large: bool,
    },
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl<'a> KeyInput<'a> {
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    pub fn with_cmd(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Resolve a key event to an action, `None` when unbound.
pub fn resolve(input: &KeyInput<'_>) -> Option<EditorAction> {
    let cmd = input.ctrl || input.meta;

    if cmd {
        return match input.key {
            "z" | "Z" if input.shift => Some(EditorAction::Redo),
            "z" | "Z" => Some(EditorAction::Undo),
            "y" | "Y" => Some(EditorAction::Redo),
            "=" | "+" => Some(EditorAction::ZoomIn),
            "-" => Some(EditorAction::ZoomOut),
            "0" => Some(EditorAction::ResetView),
            "d" | "D" => Some(EditorAction::Duplicate),
            _ => None,
        };
    }

    let direction = match input.key {
        "Delete" | "Backspace" => return Some(EditorAction::Delete),
        "ArrowUp" => NudgeDirection::Up,
        "ArrowDown" => NudgeDirection::Down,
        "ArrowLeft" => NudgeDirection::Left,
        "ArrowRight" => NudgeDirection::Right,
        _ => return None,
    };
    Some(EditorAction::Nudge {
        direction,
        large: input.shift,
    })
}
