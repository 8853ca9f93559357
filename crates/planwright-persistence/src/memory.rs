//! In-memory design store.

use crate::gateway::{autosaves_to_prune, design_not_found, revision_not_found, DesignGateway};
use crate::model::{
    overlay_canvas, CreateDesign, Design, DesignRevision, DesignStatus, DesignTemplate,
    LoadedDesign, RevisionMeta,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use planwright_core::PersistenceError;
use planwright_designer::CanvasData;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct StoreInner {
    designs: HashMap<String, Design>,
    /// Per design, ordered by index.
    revisions: HashMap<String, Vec<DesignRevision>>,
    templates: BTreeMap<String, DesignTemplate>,
}

impl StoreInner {
    fn active_design(&mut self, design_id: &str) -> Result<&mut Design, PersistenceError> {
        self.designs
            .get_mut(design_id)
            .filter(|d| !d.is_archived())
            .ok_or_else(|| design_not_found(design_id))
    }

    fn initial_canvas(&self, request: &mut CreateDesign) -> Result<CanvasData, PersistenceError> {
        let provided = request.base_data.take().unwrap_or_default();
        match &request.template_id {
            Some(template_id) => {
                let template = self.templates.get(template_id).ok_or_else(|| {
                    PersistenceError::InvalidTemplate {
                        template_id: template_id.clone(),
                    }
                })?;
                Ok(overlay_canvas(template.base_data.clone(), provided))
            }
            None => Ok(provided),
        }
    }
}

/// Design store backed by process memory. Suitable for tests and for
/// sessions that never outlive the process.
#[derive(Debug, Default)]
pub struct MemoryDesignStore {
    inner: Mutex<StoreInner>,
    retention: Option<usize>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the newest `keep` autosave revisions per design.
    pub fn with_retention(mut self, keep: Option<usize>) -> Self {
        self.retention = keep;
        self
    }

    pub fn with_templates(self, templates: impl IntoIterator<Item = DesignTemplate>) -> Self {
        {
            let mut inner = self.inner.lock();
            for template in templates {
                inner.templates.insert(template.id.clone(), template);
            }
        }
        self
    }

    /// Number of stored revisions for a design, archived or not.
    pub fn revision_count(&self, design_id: &str) -> usize {
        self.inner
            .lock()
            .revisions
            .get(design_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DesignGateway for MemoryDesignStore {
    async fn create(&self, mut request: CreateDesign) -> Result<LoadedDesign, PersistenceError> {
        let mut inner = self.inner.lock();
        let canvas_data = inner.initial_canvas(&mut request)?;
        let mut design = Design::new(request.title, request.template_id);
        let revision = DesignRevision::new(&design.id, 1, canvas_data, false);
        design.point_at(&revision);

        inner
            .revisions
            .insert(design.id.clone(), vec![revision.clone()]);
        inner.designs.insert(design.id.clone(), design.clone());
        tracing::info!("Created design {} ({})", design.id, design.title);
        Ok(LoadedDesign { design, revision })
    }

    async fn read(&self, design_id: &str) -> Result<LoadedDesign, PersistenceError> {
        let mut inner = self.inner.lock();
        let design = inner.active_design(design_id)?.clone();
        let current = design.current_revision_id.as_deref().unwrap_or_default();
        let revision = inner
            .revisions
            .get(design_id)
            .and_then(|revs| revs.iter().find(|r| r.id == current))
            .cloned()
            .ok_or_else(|| revision_not_found(design_id, current))?;
        Ok(LoadedDesign { design, revision })
    }

    async fn append_revision(
        &self,
        design_id: &str,
        canvas_data: CanvasData,
        autosave: bool,
    ) -> Result<DesignRevision, PersistenceError> {
        let mut inner = self.inner.lock();
        inner.active_design(design_id)?;
        let revisions = inner.revisions.entry(design_id.to_string()).or_default();
        let index = revisions.last().map_or(1, |r| r.index + 1);
        let revision = DesignRevision::new(design_id, index, canvas_data, autosave);
        revisions.push(revision.clone());

        let design = inner.active_design(design_id)?;
        design.point_at(&revision);
        let current = design.current_revision_id.clone();

        if let (true, Some(keep)) = (autosave, self.retention) {
            let metas: Vec<RevisionMeta> = inner
                .revisions
                .get(design_id)
                .map(|revs| revs.iter().map(DesignRevision::meta).collect())
                .unwrap_or_default();
            let prune = autosaves_to_prune(&metas, keep, current.as_deref());
            if !prune.is_empty() {
                if let Some(revs) = inner.revisions.get_mut(design_id) {
                    revs.retain(|r| !prune.iter().any(|p| p.id == r.id));
                }
                tracing::debug!("Pruned {} autosave(s) of design {}", prune.len(), design_id);
            }
        }

        tracing::debug!(
            "Appended revision {} to design {} (autosave: {})",
            index,
            design_id,
            autosave
        );
        Ok(revision)
    }

    async fn list_revisions(&self, design_id: &str) -> Result<Vec<RevisionMeta>, PersistenceError> {
        let inner = self.inner.lock();
        if !inner.designs.contains_key(design_id) {
            return Err(design_not_found(design_id));
        }
        Ok(inner
            .revisions
            .get(design_id)
            .map(|revs| revs.iter().map(DesignRevision::meta).collect())
            .unwrap_or_default())
    }

    async fn get_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError> {
        self.inner
            .lock()
            .revisions
            .get(design_id)
            .and_then(|revs| revs.iter().find(|r| r.id == revision_id))
            .cloned()
            .ok_or_else(|| revision_not_found(design_id, revision_id))
    }

    async fn list_designs(&self) -> Result<Vec<Design>, PersistenceError> {
        let inner = self.inner.lock();
        let mut designs: Vec<Design> = inner
            .designs
            .values()
            .filter(|d| !d.is_archived())
            .cloned()
            .collect();
        designs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(designs)
    }

    async fn archive_design(&self, design_id: &str) -> Result<Design, PersistenceError> {
        let mut inner = self.inner.lock();
        let design = inner
            .designs
            .get_mut(design_id)
            .ok_or_else(|| design_not_found(design_id))?;
        design.status = DesignStatus::Archived;
        tracing::info!("Archived design {}", design_id);
        Ok(design.clone())
    }

    async fn register_template(&self, template: DesignTemplate) -> Result<(), PersistenceError> {
        self.inner
            .lock()
            .templates
            .insert(template.id.clone(), template);
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<DesignTemplate>, PersistenceError> {
        Ok(self.inner.lock().templates.values().cloned().collect())
    }
}
