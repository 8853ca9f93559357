//! Stored records: designs, revisions and templates.

use chrono::{DateTime, Utc};
use planwright_designer::{CanvasData, DesignSettings};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to designs created without one.
pub const DEFAULT_TITLE: &str = "Untitled Design";

pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Lifecycle status of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStatus {
    #[default]
    Draft,
    Archived,
}

/// Design record. The layout itself lives in its revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: DesignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Latest appended revision. Only ever moves forward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_revision_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Design {
    pub(crate) fn new(title: Option<String>, template_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            status: DesignStatus::Draft,
            template_id,
            current_revision_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == DesignStatus::Archived
    }

    /// Advances the revision pointer. Manual saves also bump `updated_at`.
    pub(crate) fn point_at(&mut self, revision: &DesignRevision) {
        self.current_revision_id = Some(revision.id.clone());
        if !revision.autosave {
            self.updated_at = revision.created_at;
        }
    }
}

/// Immutable snapshot of a design's canvas data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRevision {
    pub id: String,
    pub design_id: String,
    /// 1-based, strictly increasing per design.
    pub index: u64,
    pub autosave: bool,
    pub canvas_data: CanvasData,
    pub created_at: DateTime<Utc>,
}

impl DesignRevision {
    pub(crate) fn new(design_id: &str, index: u64, canvas_data: CanvasData, autosave: bool) -> Self {
        Self {
            id: new_record_id(),
            design_id: design_id.to_string(),
            index,
            autosave,
            canvas_data,
            created_at: Utc::now(),
        }
    }

    pub fn meta(&self) -> RevisionMeta {
        RevisionMeta {
            id: self.id.clone(),
            index: self.index,
            autosave: self.autosave,
            created_at: self.created_at,
        }
    }
}

/// Revision listing entry without the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionMeta {
    pub id: String,
    pub index: u64,
    pub autosave: bool,
    pub created_at: DateTime<Utc>,
}

/// Starting point for new designs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub base_data: CanvasData,
}

impl DesignTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_data: CanvasData) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            base_data,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Request to create a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_data: Option<CanvasData>,
}

impl CreateDesign {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn from_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_base_data(mut self, base_data: CanvasData) -> Self {
        self.base_data = Some(base_data);
        self
    }
}

/// A design with its current revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedDesign {
    pub design: Design,
    pub revision: DesignRevision,
}

/// Lays `top` over `base`. Each collection present (non-empty) in `top`
/// replaces the one in `base`; settings in `top` win unless left at their
/// defaults.
pub fn overlay_canvas(base: CanvasData, top: CanvasData) -> CanvasData {
    let mut merged = base;
    if !top.nodes.is_empty() {
        merged.nodes = top.nodes;
    }
    let state = top.state;
    if !state.walls.is_empty() {
        merged.state.walls = state.walls;
    }
    if !state.cabinets.is_empty() {
        merged.state.cabinets = state.cabinets;
    }
    if !state.countertops.is_empty() {
        merged.state.countertops = state.countertops;
    }
    if !state.tile_surfaces.is_empty() {
        merged.state.tile_surfaces = state.tile_surfaces;
    }
    if state.settings != DesignSettings::default() {
        merged.state.settings = state.settings;
    }
    merged
}
