//! Countertop and tile surfaces.

use planwright_core::{perimeter, polygon_area, DesignError, Point};
use serde::{Deserialize, Serialize};

/// Kind of countertop cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoutType {
    Sink,
    Cooktop,
    Faucet,
}

/// A rectangular hole in a countertop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub id: String,
    #[serde(rename = "type")]
    pub cutout_type: CutoutType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Cutout {
    pub fn new(cutout_type: CutoutType, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: super::generate_id("cutout"),
            cutout_type,
            x,
            y,
            width,
            height,
        }
    }
}

/// A countertop slab outline.
///
/// The polygon should have at least three points and be simple; shorter
/// polygons are accepted while editing and contribute zero area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountertopSurface {
    pub id: String,
    pub polygon: Vec<Point>,
    pub thickness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_profile_id: Option<String>,
    #[serde(default)]
    pub cutouts: Vec<Cutout>,
}

impl CountertopSurface {
    pub fn new(polygon: Vec<Point>, thickness: f64) -> Self {
        Self {
            id: super::generate_id("ct"),
            polygon,
            thickness,
            material_id: None,
            edge_profile_id: None,
            cutouts: Vec::new(),
        }
    }

    /// Gross area in mm² (cutouts are not subtracted).
    pub fn area(&self) -> f64 {
        polygon_area(&self.polygon)
    }

    /// Edge length in mm.
    pub fn edge_length(&self) -> f64 {
        perimeter(&self.polygon)
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.thickness > 0.0) {
            return Err(DesignError::InvalidDimension {
                id: self.id.clone(),
                field: "thickness",
                value: self.thickness,
            });
        }
        for cutout in &self.cutouts {
            if !(cutout.width > 0.0 && cutout.height > 0.0) {
                return Err(DesignError::InvalidDimension {
                    id: cutout.id.clone(),
                    field: "cutout size",
                    value: cutout.width.min(cutout.height),
                });
            }
        }
        Ok(())
    }
}

/// Partial update for a [`CountertopSurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountertopPatch {
    pub polygon: Option<Vec<Point>>,
    pub thickness: Option<f64>,
    pub material_id: Option<Option<String>>,
    pub edge_profile_id: Option<Option<String>>,
    pub cutouts: Option<Vec<Cutout>>,
}

impl CountertopPatch {
    pub(crate) fn apply(&self, surface: &mut CountertopSurface) {
        if let Some(polygon) = &self.polygon {
            surface.polygon = polygon.clone();
        }
        if let Some(thickness) = self.thickness {
            surface.thickness = thickness;
        }
        if let Some(material_id) = &self.material_id {
            surface.material_id = material_id.clone();
        }
        if let Some(edge_profile_id) = &self.edge_profile_id {
            surface.edge_profile_id = edge_profile_id.clone();
        }
        if let Some(cutouts) = &self.cutouts {
            surface.cutouts = cutouts.clone();
        }
    }
}

/// A tiled floor or backsplash region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSurface {
    pub id: String,
    pub polygon: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
}

impl TileSurface {
    pub fn new(polygon: Vec<Point>) -> Self {
        Self {
            id: super::generate_id("tile"),
            polygon,
            material_id: None,
        }
    }
}

/// Partial update for a [`TileSurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSurfacePatch {
    pub polygon: Option<Vec<Point>>,
    pub material_id: Option<Option<String>>,
}

impl TileSurfacePatch {
    pub(crate) fn apply(&self, surface: &mut TileSurface) {
        if let Some(polygon) = &self.polygon {
            surface.polygon = polygon.clone();
        }
        if let Some(material_id) = &self.material_id {
            surface.material_id = material_id.clone();
        }
    }
}
