//! Keyboard dispatch for the designer session.

use super::DesignerSession;
use crate::shortcuts::{resolve, EditorAction, KeyInput};

impl DesignerSession {
    /// Resolves and performs a shortcut. Returns the action when the key
    /// is bound, whether or not it changed anything.
    pub fn handle_key(&mut self, input: &KeyInput<'_>) -> Option<EditorAction> {
        let action = resolve(input)?;
        let result = match action {
            EditorAction::Undo => {
                self.undo();
                Ok(())
            }
            EditorAction::Redo => {
                self.redo();
                Ok(())
            }
            EditorAction::ZoomIn => {
                self.viewport.zoom_in();
                Ok(())
            }
            EditorAction::ZoomOut => {
                self.viewport.zoom_out();
                Ok(())
            }
            EditorAction::ResetView => {
                self.viewport.reset();
                Ok(())
            }
            EditorAction::Delete => self.delete_selection(),
            EditorAction::Duplicate => self.duplicate_selection().map(|_| ()),
            EditorAction::Nudge { direction, large } => self.nudge(direction, large),
        };
        if let Err(e) = result {
            tracing::debug!("Shortcut {:?} ignored: {}", action, e);
        }
        Some(action)
    }
}
