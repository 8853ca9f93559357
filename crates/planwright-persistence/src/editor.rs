//! Editor context tying a designer session to persistence.
//!
//! Every edit goes through [`DesignEditor::edit`], which compares the
//! session's edit generation before and after the closure. Any change
//! marks the design dirty. A snapshot goes to the autosave scheduler once no
//! gesture is in progress, so a drag schedules one autosave when it ends.

use crate::autosave::{AutosaveScheduler, SaveStatus};
use crate::dirty::DirtyTracker;
use crate::gateway::DesignGateway;
use crate::model::{CreateDesign, Design, DesignRevision, LoadedDesign};
use planwright_core::{EditorConfig, PersistenceError};
use planwright_designer::{CatalogRegistry, DesignerSession};
use std::sync::Arc;
use tokio::sync::watch;

/// Outcome of asking to leave the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Nothing unsaved; leave freely.
    Proceed,
    /// Unsaved changes exist; the user must confirm discarding them.
    ConfirmDiscard,
}

/// An open design: session, dirty tracking and autosave.
pub struct DesignEditor {
    design: Design,
    session: DesignerSession,
    gateway: Arc<dyn DesignGateway>,
    tracker: Arc<DirtyTracker>,
    autosave: AutosaveScheduler,
    scheduled: u64,
}

impl std::fmt::Debug for DesignEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignEditor")
            .field("design", &self.design.id)
            .field("edit_generation", &self.session.edit_generation())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

impl DesignEditor {
    /// Creates a design through the gateway and opens it.
    pub async fn create(
        gateway: Arc<dyn DesignGateway>,
        config: &EditorConfig,
        catalog: Arc<CatalogRegistry>,
        request: CreateDesign,
    ) -> Result<Self, PersistenceError> {
        let loaded = gateway.create(request).await?;
        Ok(Self::from_loaded(gateway, config, catalog, loaded))
    }

    /// Opens an existing design at its current revision.
    pub async fn open(
        gateway: Arc<dyn DesignGateway>,
        config: &EditorConfig,
        catalog: Arc<CatalogRegistry>,
        design_id: &str,
    ) -> Result<Self, PersistenceError> {
        let loaded = gateway.read(design_id).await?;
        Ok(Self::from_loaded(gateway, config, catalog, loaded))
    }

    fn from_loaded(
        gateway: Arc<dyn DesignGateway>,
        config: &EditorConfig,
        catalog: Arc<CatalogRegistry>,
        loaded: LoadedDesign,
    ) -> Self {
        let LoadedDesign { design, revision } = loaded;
        tracing::info!(
            "Opened design {} at revision {}",
            design.id,
            revision.index
        );
        let session = DesignerSession::with_canvas(config, catalog, revision.canvas_data);
        let scheduled = session.edit_generation();
        let tracker = Arc::new(DirtyTracker::new());
        let autosave = AutosaveScheduler::spawn(
            gateway.clone(),
            design.id.clone(),
            tracker.clone(),
            config.autosave.delay(),
        );
        Self {
            design,
            session,
            gateway,
            tracker,
            autosave,
            scheduled,
        }
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn session(&self) -> &DesignerSession {
        &self.session
    }

    /// Runs an edit against the session. Any mutation marks the design
    /// dirty; outside a gesture it also restarts the autosave timer.
    pub fn edit<R>(&mut self, edit: impl FnOnce(&mut DesignerSession) -> R) -> R {
        let before = self.session.edit_generation();
        let result = edit(&mut self.session);
        let generation = self.session.edit_generation();
        if generation != before {
            self.tracker.mark_edited(generation);
        }
        if generation > self.scheduled && self.session.gesture().is_idle() {
            self.schedule_autosave(generation);
        }
        result
    }

    fn schedule_autosave(&mut self, generation: u64) {
        self.scheduled = generation;
        self.autosave.touch(self.session.snapshot(), generation);
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn save_status(&self) -> watch::Receiver<SaveStatus> {
        self.autosave.status()
    }

    pub fn is_autosave_running(&self) -> bool {
        self.autosave.is_running()
    }

    /// Saves immediately as a manual revision, cancelling any pending
    /// autosave and waiting for one already in flight. On failure the
    /// session is left as it was and autosave is re-armed.
    pub async fn save(&mut self) -> Result<DesignRevision, PersistenceError> {
        self.autosave.cancel();
        let generation = self.session.edit_generation();
        let snapshot = self.session.snapshot();
        let save_lock = self.autosave.save_lock();
        let guard = save_lock.lock().await;
        self.autosave.publish(SaveStatus::Saving);
        let result = self
            .gateway
            .append_revision(&self.design.id, snapshot, false)
            .await;
        drop(guard);
        match result {
            Ok(revision) => {
                self.tracker.mark_saved(generation);
                self.scheduled = self.scheduled.max(generation);
                self.design.point_at(&revision);
                self.autosave.publish(SaveStatus::Saved {
                    index: revision.index,
                    autosave: false,
                });
                tracing::info!("Saved design {} as revision {}", self.design.id, revision.index);
                Ok(revision)
            }
            Err(e) => {
                tracing::warn!("Saving design {} failed: {}", self.design.id, e);
                self.autosave.publish(SaveStatus::Failed {
                    message: e.to_string(),
                });
                if self.tracker.is_dirty() {
                    self.schedule_autosave(generation);
                }
                Err(e)
            }
        }
    }

    /// Decides whether leaving needs a discard confirmation.
    pub fn request_exit(&self) -> ExitDecision {
        if self.is_dirty() {
            ExitDecision::ConfirmDiscard
        } else {
            ExitDecision::Proceed
        }
    }

    /// Closes the editor, dropping unsaved changes. The autosave timer is
    /// cancelled.
    pub fn close(self) {
        if self.is_dirty() {
            tracing::warn!("Discarding unsaved changes to design {}", self.design.id);
        }
        self.autosave.shutdown();
    }

    /// Saves if dirty, then closes.
    pub async fn save_and_close(mut self) -> Result<(), PersistenceError> {
        if self.is_dirty() {
            self.save().await?;
        }
        self.close();
        Ok(())
    }
}
