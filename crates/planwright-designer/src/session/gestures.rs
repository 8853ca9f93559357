//! Pan, drag and resize gestures for the designer session.
//!
//! In-gesture updates mutate the canvas directly and never commit; ending
//! a drag or resize commits the pre-gesture snapshot once, and only if the
//! canvas changed. Abandoning a gesture runs the same end step, and ending
//! an idle session is a no-op, so cleanup happens exactly once.

use super::DesignerSession;
use crate::gesture::{Gesture, PanTrigger};
use crate::viewport::ScreenPoint;
use planwright_core::{DesignError, Point};

impl DesignerSession {
    /// Starts panning when the trigger qualifies. Returns whether a pan
    /// began.
    pub fn begin_pan(&mut self, at: ScreenPoint, trigger: PanTrigger) -> bool {
        if !trigger.qualifies() {
            return false;
        }
        self.end_gesture();
        self.gesture = Gesture::Panning {
            start: at,
            origin_pan: self.viewport.pan(),
        };
        true
    }

    /// Starts dragging a node or cabinet and selects it.
    pub fn begin_drag(&mut self, id: &str, at: ScreenPoint) -> Result<(), DesignError> {
        self.end_gesture();
        let origin = self.canvas.position_of(id)?;
        self.selection = Some(id.to_string());
        self.gesture = Gesture::Dragging {
            id: id.to_string(),
            start: at,
            origin,
            before: Box::new(self.canvas.clone()),
        };
        Ok(())
    }

    /// Starts resizing a node or cabinet and selects it.
    pub fn begin_resize(&mut self, id: &str, at: ScreenPoint) -> Result<(), DesignError> {
        self.end_gesture();
        let origin_size = self.canvas.size_of(id)?;
        self.selection = Some(id.to_string());
        self.gesture = Gesture::Resizing {
            id: id.to_string(),
            start: at,
            origin_size,
            before: Box::new(self.canvas.clone()),
        };
        Ok(())
    }

    /// Applies the pointer position to the active gesture.
    pub fn update_gesture(&mut self, at: ScreenPoint) {
        match &self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { start, origin_pan } => {
                let x = origin_pan.0 + (at.x - start.x);
                let y = origin_pan.1 + (at.y - start.y);
                self.viewport.set_pan(x, y);
            }
            Gesture::Dragging {
                id, start, origin, ..
            } => {
                let (dx, dy) = self
                    .viewport
                    .screen_delta_to_model(at.x - start.x, at.y - start.y);
                let target = self
                    .viewport
                    .snap_point(Point::new(origin.x + dx, origin.y + dy));
                let id = id.clone();
                let result = self.canvas.set_position(&id, target);
                self.after_live_update(&id, result);
            }
            Gesture::Resizing {
                id,
                start,
                origin_size,
                ..
            } => {
                let (dx, dy) = self
                    .viewport
                    .screen_delta_to_model(at.x - start.x, at.y - start.y);
                let min = self.interaction.min_resize;
                let fit = |v: f64| {
                    if self.viewport.snap_enabled() {
                        self.viewport.snap_size(v, min)
                    } else {
                        v.max(min)
                    }
                };
                let (w, h) = (fit(origin_size.0 + dx), fit(origin_size.1 + dy));
                let id = id.clone();
                let result = self.canvas.set_size(&id, w, h);
                self.after_live_update(&id, result);
            }
        }
    }

    fn after_live_update(&mut self, id: &str, result: Result<(), DesignError>) {
        match result {
            Ok(()) => self.touch(),
            Err(e) => tracing::warn!("Gesture update on '{}' failed: {}", id, e),
        }
    }

    /// Ends the active gesture. Returns whether a history entry was
    /// committed.
    pub fn end_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => false,
            Gesture::Dragging { id, before, .. } | Gesture::Resizing { id, before, .. } => {
                if *before == self.canvas {
                    return false;
                }
                self.history.commit(*before);
                tracing::debug!("Gesture on '{}' committed", id);
                true
            }
        }
    }

    /// Ends a gesture that lost its pointer (focus loss, pointer capture
    /// lost). Same cleanup as [`Self::end_gesture`].
    pub fn abandon_gesture(&mut self) -> bool {
        if !self.gesture.is_idle() {
            tracing::debug!("Abandoning {} gesture", self.gesture.name());
        }
        self.end_gesture()
    }
}
