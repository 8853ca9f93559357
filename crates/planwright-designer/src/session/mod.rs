//! Interactive editing session.
//!
//! Owns the canvas data of one design together with its undo history,
//! viewport, active gesture and selection. This module is split into
//! submodules:
//! - `editing`: structural edits, each paired with one history commit
//! - `gestures`: pan/drag/resize state machine transitions
//! - `input`: keyboard shortcut dispatch
//!
//! Every mutation (committed or in-gesture) advances the edit generation,
//! which persistence compares against its saved generation to decide
//! whether the design is dirty.

mod editing;
mod gestures;
mod input;

pub use editing::GENERATED_COUNTERTOP_ID;

use crate::canvas::CanvasData;
use crate::catalog::CatalogRegistry;
use crate::design_state::DesignState;
use crate::gesture::Gesture;
use crate::history::History;
use crate::takeoff::{compute_takeoff, Takeoff};
use crate::viewport::Viewport;
use planwright_core::{DesignError, EditorConfig, InteractionSettings};
use std::sync::Arc;

/// Single-writer editing session for one design.
#[derive(Debug)]
pub struct DesignerSession {
    canvas: CanvasData,
    history: History<CanvasData>,
    viewport: Viewport,
    gesture: Gesture,
    selection: Option<String>,
    catalog: Arc<CatalogRegistry>,
    interaction: InteractionSettings,
    edit_generation: u64,
}

impl DesignerSession {
    /// Creates a session over an empty design in the configured units.
    pub fn new(config: &EditorConfig, catalog: Arc<CatalogRegistry>) -> Self {
        let canvas = CanvasData::new(DesignState::with_units(config.default_units));
        Self::with_canvas(config, catalog, canvas)
    }

    /// Creates a session over loaded canvas data. History starts empty.
    pub fn with_canvas(
        config: &EditorConfig,
        catalog: Arc<CatalogRegistry>,
        canvas: CanvasData,
    ) -> Self {
        Self {
            canvas,
            history: History::new(config.history.capacity),
            viewport: Viewport::new(&config.viewport),
            gesture: Gesture::Idle,
            selection: None,
            catalog,
            interaction: config.interaction.clone(),
            edit_generation: 0,
        }
    }

    pub fn canvas(&self) -> &CanvasData {
        &self.canvas
    }

    pub fn state(&self) -> &DesignState {
        &self.canvas.state
    }

    /// Owned copy of the canvas for persistence.
    pub fn snapshot(&self) -> CanvasData {
        self.canvas.clone()
    }

    pub fn catalog(&self) -> &CatalogRegistry {
        &self.catalog
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Zoom, pan and toggles never touch history or dirty state.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn history(&self) -> &History<CanvasData> {
        &self.history
    }

    /// Monotonic counter advanced by every mutation.
    pub fn edit_generation(&self) -> u64 {
        self.edit_generation
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn select(&mut self, id: &str) -> Result<(), DesignError> {
        if !self.canvas.contains(id) {
            return Err(DesignError::not_found("element", id));
        }
        self.selection = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn takeoff(&self) -> Takeoff {
        compute_takeoff(&self.canvas.state)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Steps back one commit. An active gesture is ended first.
    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.undo(&mut self.canvas);
        if changed {
            self.after_history_step();
        }
        changed
    }

    /// Re-applies one undone commit. An active gesture is ended first.
    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.history.redo(&mut self.canvas);
        if changed {
            self.after_history_step();
        }
        changed
    }

    fn after_history_step(&mut self) {
        self.touch();
        if let Some(id) = &self.selection {
            if !self.canvas.contains(id) {
                self.selection = None;
            }
        }
    }

    fn touch(&mut self) {
        self.edit_generation += 1;
    }

    /// Runs one structural mutation as a single history entry.
    ///
    /// Any active gesture is ended first. On error the canvas is restored
    /// and nothing is committed.
    fn commit_with<R>(
        &mut self,
        action: &str,
        mutate: impl FnOnce(&mut CanvasData) -> Result<R, DesignError>,
    ) -> Result<R, DesignError> {
        self.end_gesture();
        let before = self.canvas.clone();
        match mutate(&mut self.canvas) {
            Ok(value) => {
                self.history.commit(before);
                self.touch();
                tracing::debug!("{} (generation {})", action, self.edit_generation);
                Ok(value)
            }
            Err(e) => {
                self.canvas = before;
                tracing::warn!("{} failed: {}", action, e);
                Err(e)
            }
        }
    }
}
