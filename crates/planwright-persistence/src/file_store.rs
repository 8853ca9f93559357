//! File-backed design store.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/<design_id>/design.json
//! <root>/<design_id>/revisions/00000001.json
//! <root>/_templates/<template_id>.json
//! ```
//!
//! Revision files are written to a temporary name and hard-linked into
//! place, so an existing revision is never overwritten and a failed write
//! leaves nothing behind. Revision indices come from file names; a revision
//! file that does not parse is skipped with a warning. Design records are
//! replaced through a temporary file and a rename.

use crate::gateway::{autosaves_to_prune, design_not_found, revision_not_found, DesignGateway};
use crate::model::{
    overlay_canvas, CreateDesign, Design, DesignRevision, DesignStatus, DesignTemplate,
    LoadedDesign, RevisionMeta,
};
use async_trait::async_trait;
use planwright_core::PersistenceError;
use planwright_designer::CanvasData;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

const DESIGN_FILE: &str = "design.json";
const REVISIONS_DIR: &str = "revisions";
const TEMPLATES_DIR: &str = "_templates";

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn replace_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// Ids become path components; anything that could escape the store root
/// is treated as unknown.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.starts_with('_')
        && !id.contains(['/', '\\'])
}

/// Design store persisting JSON files on disk.
#[derive(Debug)]
pub struct FileDesignStore {
    root: PathBuf,
    retention: Option<usize>,
    /// Serialises appends so index assignment and pointer updates stay
    /// consistent within this process.
    write_lock: Mutex<()>,
}

impl FileDesignStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(root.join(TEMPLATES_DIR)).await?;
        tracing::debug!("Opened design store at {}", root.display());
        Ok(Self {
            root,
            retention: None,
            write_lock: Mutex::new(()),
        })
    }

    /// Keeps only the newest `keep` autosave revisions per design.
    pub fn with_retention(mut self, keep: Option<usize>) -> Self {
        self.retention = keep;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn design_dir(&self, design_id: &str) -> PathBuf {
        self.root.join(design_id)
    }

    fn revisions_dir(&self, design_id: &str) -> PathBuf {
        self.design_dir(design_id).join(REVISIONS_DIR)
    }

    /// Path of the file holding revision `index` of a design.
    pub fn revision_path(&self, design_id: &str, index: u64) -> PathBuf {
        self.revisions_dir(design_id)
            .join(format!("{:08}.json", index))
    }

    fn template_path(&self, template_id: &str) -> PathBuf {
        self.root
            .join(TEMPLATES_DIR)
            .join(format!("{}.json", template_id))
    }

    async fn load_design(&self, design_id: &str) -> Result<Design, PersistenceError> {
        if !is_safe_id(design_id) {
            return Err(design_not_found(design_id));
        }
        read_json(&self.design_dir(design_id).join(DESIGN_FILE))
            .await?
            .ok_or_else(|| design_not_found(design_id))
    }

    async fn load_active_design(&self, design_id: &str) -> Result<Design, PersistenceError> {
        let design = self.load_design(design_id).await?;
        if design.is_archived() {
            return Err(design_not_found(design_id));
        }
        Ok(design)
    }

    async fn store_design(&self, design: &Design) -> Result<(), PersistenceError> {
        replace_json(&self.design_dir(&design.id).join(DESIGN_FILE), design).await
    }

    /// Indices of the revision files of a design, ascending. Taken from file
    /// names alone; payloads are not read.
    async fn revision_indices(&self, design_id: &str) -> Result<Vec<u64>, PersistenceError> {
        let mut indices = Vec::new();
        let mut entries = match fs::read_dir(self.revisions_dir(design_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(indices),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(index) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                indices.push(index);
            }
        }
        indices.sort_unstable();
        Ok(indices)
    }

    /// Reads one revision file. A file that does not parse is logged and
    /// treated as absent.
    async fn load_revision(
        &self,
        design_id: &str,
        index: u64,
    ) -> Result<Option<DesignRevision>, PersistenceError> {
        let path = self.revision_path(design_id, index);
        match read_json::<DesignRevision>(&path).await {
            Err(PersistenceError::Serialization(e)) => {
                tracing::warn!("Skipping unreadable revision {}: {}", path.display(), e);
                Ok(None)
            }
            other => other,
        }
    }

    /// All readable revisions of a design ordered by index.
    async fn load_revisions(&self, design_id: &str) -> Result<Vec<DesignRevision>, PersistenceError> {
        let mut revisions = Vec::new();
        for index in self.revision_indices(design_id).await? {
            if let Some(revision) = self.load_revision(design_id, index).await? {
                revisions.push(revision);
            }
        }
        Ok(revisions)
    }

    /// Finds a revision by id, newest first.
    async fn find_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError> {
        for index in self.revision_indices(design_id).await?.into_iter().rev() {
            if let Some(revision) = self.load_revision(design_id, index).await? {
                if revision.id == revision_id {
                    return Ok(revision);
                }
            }
        }
        Err(revision_not_found(design_id, revision_id))
    }

    /// Writes the revision to a temporary file, then links it into place.
    /// The link fails if the final name exists, so a revision file is never
    /// replaced and never visible half-written.
    async fn write_revision(&self, revision: &DesignRevision) -> Result<(), PersistenceError> {
        let path = self.revision_path(&revision.design_id, revision.index);
        let tmp = self.revisions_dir(&revision.design_id).join(format!(
            "{:08}.{}.tmp",
            revision.index,
            Uuid::new_v4().simple()
        ));
        let bytes = serde_json::to_vec_pretty(revision)?;

        let published = async {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp)
                .await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            drop(file);
            fs::hard_link(&tmp, &path).await
        }
        .await;

        if let Err(e) = fs::remove_file(&tmp).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Could not remove {}: {}", tmp.display(), e);
            }
        }

        match published {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!("Refusing to overwrite {}", path.display());
                Err(PersistenceError::ConcurrencyConflict {
                    expected: revision.index.saturating_sub(1),
                    actual: revision.index,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn prune_autosaves(&self, design: &Design, keep: usize) -> Result<(), PersistenceError> {
        let metas: Vec<RevisionMeta> = self
            .load_revisions(&design.id)
            .await?
            .iter()
            .map(DesignRevision::meta)
            .collect();
        let prune = autosaves_to_prune(&metas, keep, design.current_revision_id.as_deref());
        for meta in &prune {
            fs::remove_file(self.revision_path(&design.id, meta.index)).await?;
        }
        if !prune.is_empty() {
            tracing::debug!("Pruned {} autosave(s) of design {}", prune.len(), design.id);
        }
        Ok(())
    }
}

#[async_trait]
impl DesignGateway for FileDesignStore {
    async fn create(&self, request: CreateDesign) -> Result<LoadedDesign, PersistenceError> {
        let provided = request.base_data.unwrap_or_default();
        let canvas_data = match &request.template_id {
            Some(template_id) => {
                let template: Option<DesignTemplate> = if is_safe_id(template_id) {
                    read_json(&self.template_path(template_id)).await?
                } else {
                    None
                };
                let template = template.ok_or_else(|| PersistenceError::InvalidTemplate {
                    template_id: template_id.clone(),
                })?;
                overlay_canvas(template.base_data, provided)
            }
            None => provided,
        };

        let _guard = self.write_lock.lock().await;
        let mut design = Design::new(request.title, request.template_id);
        fs::create_dir_all(self.revisions_dir(&design.id)).await?;
        let revision = DesignRevision::new(&design.id, 1, canvas_data, false);
        self.write_revision(&revision).await?;
        design.point_at(&revision);
        self.store_design(&design).await?;
        tracing::info!("Created design {} ({})", design.id, design.title);
        Ok(LoadedDesign { design, revision })
    }

    async fn read(&self, design_id: &str) -> Result<LoadedDesign, PersistenceError> {
        let design = self.load_active_design(design_id).await?;
        let current = design.current_revision_id.clone().unwrap_or_default();
        let revision = self.find_revision(design_id, &current).await?;
        Ok(LoadedDesign { design, revision })
    }

    async fn append_revision(
        &self,
        design_id: &str,
        canvas_data: CanvasData,
        autosave: bool,
    ) -> Result<DesignRevision, PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut design = self.load_active_design(design_id).await?;
        let index = self
            .revision_indices(design_id)
            .await?
            .last()
            .map_or(1, |last| last + 1);
        let revision = DesignRevision::new(design_id, index, canvas_data, autosave);
        self.write_revision(&revision).await?;
        design.point_at(&revision);
        self.store_design(&design).await?;

        if let (true, Some(keep)) = (autosave, self.retention) {
            self.prune_autosaves(&design, keep).await?;
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
        self.load_design(design_id).await?;
        Ok(self
            .load_revisions(design_id)
            .await?
            .iter()
            .map(DesignRevision::meta)
            .collect())
    }

    async fn get_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError> {
        if !is_safe_id(design_id) {
            return Err(revision_not_found(design_id, revision_id));
        }
        self.find_revision(design_id, revision_id).await
    }

    async fn list_designs(&self) -> Result<Vec<Design>, PersistenceError> {
        let mut designs = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !is_safe_id(name) || !entry.file_type().await?.is_dir() {
                continue;
            }
            match read_json::<Design>(&entry.path().join(DESIGN_FILE)).await {
                Ok(Some(design)) if !design.is_archived() => designs.push(design),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable design {}: {}", name, e),
            }
        }
        designs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(designs)
    }

    async fn archive_design(&self, design_id: &str) -> Result<Design, PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut design = self.load_design(design_id).await?;
        design.status = DesignStatus::Archived;
        self.store_design(&design).await?;
        tracing::info!("Archived design {}", design_id);
        Ok(design)
    }

    async fn register_template(&self, template: DesignTemplate) -> Result<(), PersistenceError> {
        if !is_safe_id(&template.id) {
            return Err(PersistenceError::InvalidTemplate {
                template_id: template.id,
            });
        }
        replace_json(&self.template_path(&template.id), &template).await
    }

    async fn list_templates(&self) -> Result<Vec<DesignTemplate>, PersistenceError> {
        let mut templates = Vec::new();
        let mut entries = fs::read_dir(self.root.join(TEMPLATES_DIR)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(template) = read_json::<DesignTemplate>(&path).await? {
                templates.push(template);
            }
        }
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(templates)
    }
}
