//! Pointer gesture state machine.
//!
//! ```text
//! Idle --begin_pan--> Panning --end--> Idle
//! Idle --begin_drag(id)--> Dragging --end--> Idle   (one history commit)
//! Idle --begin_resize(id)--> Resizing --end--> Idle (one history commit)
//! ```
//!
//! Transitions are driven by [`crate::DesignerSession`]; this module only
//! holds the per-gesture state captured on entry.

use crate::canvas::CanvasData;
use crate::viewport::ScreenPoint;
use planwright_core::Point;

/// Active pointer gesture.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        start: ScreenPoint,
        origin_pan: (f64, f64),
    },
    Dragging {
        id: String,
        start: ScreenPoint,
        origin: Point,
        before: Box<CanvasData>,
    },
    Resizing {
        id: String,
        start: ScreenPoint,
        origin_size: (f64, f64),
        before: Box<CanvasData>,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
        }
    }

    /// Id of the element being dragged or resized.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Pointer button that started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Conditions under which a canvas press starts a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanTrigger {
    pub button: PointerButton,
    /// Shift, Alt, Ctrl or Meta held
    pub modifier: bool,
    /// Press landed on the canvas background rather than an element
    pub on_empty_canvas: bool,
}

impl PanTrigger {
    /// Middle button, any modifier, or a press on empty canvas.
    pub fn qualifies(&self) -> bool {
        self.button == PointerButton::Middle || self.modifier || self.on_empty_canvas
    }
}
