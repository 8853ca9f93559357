//! Catalog of placeable cabinet templates.
//!
//! A registry is built once and handed to whoever needs it; nothing reads a
//! global catalog. Instantiated cabinets keep no link back to their spec.

use crate::model::{Cabinet, CabinetMount};
use planwright_core::{inches_to_mm, DesignError};
use serde::{Deserialize, Serialize};

/// Immutable template for a cabinet, dimensions in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCabinetSpec {
    pub id: String,
    pub mount: CabinetMount,
    pub width_in: f64,
    pub depth_in: f64,
    pub height_in: f64,
    pub label: String,
}

impl CatalogCabinetSpec {
    pub fn new(
        id: impl Into<String>,
        mount: CabinetMount,
        width_in: f64,
        depth_in: f64,
        height_in: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            mount,
            width_in,
            depth_in,
            height_in,
            label: label.into(),
        }
    }
}

/// Read-only, versioned list of catalog specs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRegistry {
    version: String,
    specs: Vec<CatalogCabinetSpec>,
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CatalogRegistry {
    /// The built-in cabinet catalog.
    pub fn standard() -> Self {
        Self {
            version: "2024.1".to_string(),
            specs: vec![
                CatalogCabinetSpec::new("base-30", CabinetMount::Base, 30.0, 24.0, 34.5, "Base 30\""),
                CatalogCabinetSpec::new("base-36", CabinetMount::Base, 36.0, 24.0, 34.5, "Base 36\""),
                CatalogCabinetSpec::new("wall-30x30", CabinetMount::Wall, 30.0, 12.0, 30.0, "Wall 30\"H"),
                CatalogCabinetSpec::new("tall-24x84", CabinetMount::Tall, 24.0, 24.0, 84.0, "Tall 84\""),
                CatalogCabinetSpec::new("island-36", CabinetMount::Island, 36.0, 24.0, 34.5, "Island 36\""),
            ],
        }
    }

    /// A substitute catalog, e.g. a fixed fixture for tests.
    pub fn with_specs(version: impl Into<String>, specs: Vec<CatalogCabinetSpec>) -> Self {
        Self {
            version: version.into(),
            specs,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn get(&self, spec_id: &str) -> Option<&CatalogCabinetSpec> {
        self.specs.iter().find(|s| s.id == spec_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogCabinetSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Creates a cabinet from a spec at model position `(x, y)`.
    ///
    /// Inch dimensions are multiplied by 25.4 with no intermediate rounding.
    pub fn instantiate(&self, spec_id: &str, x: f64, y: f64) -> Result<Cabinet, DesignError> {
        let spec = self
            .get(spec_id)
            .ok_or_else(|| DesignError::not_found("catalog spec", spec_id))?;

        let cabinet = Cabinet::new(
            spec.mount,
            inches_to_mm(spec.width_in),
            inches_to_mm(spec.depth_in),
            inches_to_mm(spec.height_in),
            x,
            y,
        )
        .with_label(spec.label.clone());
        Ok(cabinet)
    }
}
