//! Cabinets placed in plan view.

use planwright_core::DesignError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a cabinet is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CabinetMount {
    Base,
    Wall,
    Tall,
    Island,
    CornerBlind,
    CornerDiag,
}

impl fmt::Display for CabinetMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Wall => "wall",
            Self::Tall => "tall",
            Self::Island => "island",
            Self::CornerBlind => "corner-blind",
            Self::CornerDiag => "corner-diag",
        };
        f.write_str(name)
    }
}

/// A drawer front within a cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawer {
    pub id: String,
    pub height: f64,
}

/// A placed cabinet. Dimensions and position are mm, rotation is degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cabinet {
    pub id: String,
    pub mount: CabinetMount,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawers: Option<Vec<Drawer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Cabinet {
    /// Creates an unrotated cabinet with a generated id.
    pub fn new(mount: CabinetMount, width: f64, depth: f64, height: f64, x: f64, y: f64) -> Self {
        Self {
            id: super::generate_id("cab"),
            mount,
            width,
            depth,
            height,
            x,
            y,
            rotation: 0.0,
            label: None,
            sku: None,
            door_style_id: None,
            finish_id: None,
            drawers: None,
            metadata: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Rejects non-positive (or NaN) dimensions.
    pub fn validate(&self) -> Result<(), DesignError> {
        for (field, value) in [
            ("width", self.width),
            ("depth", self.depth),
            ("height", self.height),
        ] {
            if !(value > 0.0) {
                return Err(DesignError::InvalidDimension {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Partial update for a [`Cabinet`]. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CabinetPatch {
    pub mount: Option<CabinetMount>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub height: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub label: Option<Option<String>>,
    pub sku: Option<Option<String>>,
    pub door_style_id: Option<Option<String>>,
    pub finish_id: Option<Option<String>>,
}

impl CabinetPatch {
    /// Patch that moves a cabinet.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub(crate) fn apply(&self, cabinet: &mut Cabinet) {
        if let Some(mount) = self.mount {
            cabinet.mount = mount;
        }
        if let Some(width) = self.width {
            cabinet.width = width;
        }
        if let Some(depth) = self.depth {
            cabinet.depth = depth;
        }
        if let Some(height) = self.height {
            cabinet.height = height;
        }
        if let Some(x) = self.x {
            cabinet.x = x;
        }
        if let Some(y) = self.y {
            cabinet.y = y;
        }
        if let Some(rotation) = self.rotation {
            cabinet.rotation = rotation;
        }
        if let Some(label) = &self.label {
            cabinet.label = label.clone();
        }
        if let Some(sku) = &self.sku {
            cabinet.sku = sku.clone();
        }
        if let Some(door_style_id) = &self.door_style_id {
            cabinet.door_style_id = door_style_id.clone();
        }
        if let Some(finish_id) = &self.finish_id {
            cabinet.finish_id = finish_id.clone();
        }
    }
}
