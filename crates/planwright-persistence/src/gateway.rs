//! Persistence gateway abstraction.
//!
//! Designs own an append-only list of revisions. Every save appends a new
//! revision with the next index and moves the design's current-revision
//! pointer forward; stored revisions are never rewritten.

use crate::model::{CreateDesign, Design, DesignRevision, DesignTemplate, LoadedDesign, RevisionMeta};
use async_trait::async_trait;
use planwright_core::PersistenceError;
use planwright_designer::CanvasData;

/// Storage collaborator for designs and their revisions.
#[async_trait]
pub trait DesignGateway: Send + Sync {
    /// Creates a design with its first manual revision (index 1).
    ///
    /// The revision's canvas data is the template's base data overlaid by
    /// the request's base data. An unknown template is rejected.
    async fn create(&self, request: CreateDesign) -> Result<LoadedDesign, PersistenceError>;

    /// Loads a design and its current revision. Archived designs are not
    /// found.
    async fn read(&self, design_id: &str) -> Result<LoadedDesign, PersistenceError>;

    /// Appends a revision with the next index.
    async fn append_revision(
        &self,
        design_id: &str,
        canvas_data: CanvasData,
        autosave: bool,
    ) -> Result<DesignRevision, PersistenceError>;

    /// Revision metadata ordered by index ascending.
    async fn list_revisions(&self, design_id: &str) -> Result<Vec<RevisionMeta>, PersistenceError>;

    async fn get_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError>;

    /// Active designs, most recently updated first.
    async fn list_designs(&self) -> Result<Vec<Design>, PersistenceError>;

    async fn archive_design(&self, design_id: &str) -> Result<Design, PersistenceError>;

    /// Registers (or replaces) a template.
    async fn register_template(&self, template: DesignTemplate) -> Result<(), PersistenceError>;

    async fn list_templates(&self) -> Result<Vec<DesignTemplate>, PersistenceError>;

    /// Copies an old revision's canvas data into a new manual revision.
    async fn restore_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError> {
        let old = self.get_revision(design_id, revision_id).await?;
        tracing::info!(
            "Restoring revision {} of design {}",
            old.index,
            design_id
        );
        self.append_revision(design_id, old.canvas_data, false).await
    }
}

pub(crate) fn design_not_found(design_id: &str) -> PersistenceError {
    PersistenceError::DesignNotFound {
        design_id: design_id.to_string(),
    }
}

pub(crate) fn revision_not_found(design_id: &str, revision_id: &str) -> PersistenceError {
    PersistenceError::RevisionNotFound {
        design_id: design_id.to_string(),
        revision_id: revision_id.to_string(),
    }
}

/// Autosave revisions to delete so only the newest `keep` remain. The
/// current revision is never selected.
pub(crate) fn autosaves_to_prune(
    revisions: &[RevisionMeta],
    keep: usize,
    current_revision_id: Option<&str>,
) -> Vec<RevisionMeta> {
    let mut autosaves: Vec<&RevisionMeta> = revisions.iter().filter(|r| r.autosave).collect();
    autosaves.sort_by(|a, b| b.index.cmp(&a.index));
    autosaves
        .into_iter()
        .skip(keep)
        .filter(|r| Some(r.id.as_str()) != current_revision_id)
        .cloned()
        .collect()
}
