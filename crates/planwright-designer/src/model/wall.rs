//! Walls and their door/window openings.

use planwright_core::{DesignError, Point};
use serde::{Deserialize, Serialize};

/// Kind of wall opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    Door,
    Window,
}

/// A door or window cut into a wall.
///
/// `offset` is the distance from the wall start along its centerline (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: String,
    #[serde(rename = "type")]
    pub opening_type: OpeningType,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_height: Option<f64>,
}

impl Opening {
    /// Creates a new opening with a generated id.
    pub fn new(opening_type: OpeningType, offset: f64, width: f64, height: f64) -> Self {
        Self {
            id: super::generate_id("opening"),
            opening_type,
            offset,
            width,
            height,
            sill_height: None,
        }
    }

    /// Sets the sill height (windows).
    pub fn with_sill_height(mut self, sill_height: f64) -> Self {
        self.sill_height = Some(sill_height);
        self
    }

    fn end(&self) -> f64 {
        self.offset + self.width
    }
}

/// A straight wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
    pub height: f64,
    /// Ordered by `offset`
    #[serde(default)]
    pub openings: Vec<Opening>,
}

impl Wall {
    /// Creates a wall without openings.
    pub fn new(start: Point, end: Point, thickness: f64, height: f64) -> Self {
        Self {
            id: super::generate_id("wall"),
            start,
            end,
            thickness,
            height,
            openings: Vec::new(),
        }
    }

    /// Centerline length in mm.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    fn opening_error(&self, opening_id: &str, reason: String) -> DesignError {
        DesignError::InvalidOpening {
            wall_id: self.id.clone(),
            opening_id: opening_id.to_string(),
            reason,
        }
    }

    /// Checks dimensions and opening placement.
    ///
    /// Every opening offset must lie within `[0, length]`, and the spans
    /// `[offset, offset + width)` of neighbouring openings must not overlap.
    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.thickness > 0.0) {
            return Err(DesignError::InvalidDimension {
                id: self.id.clone(),
                field: "thickness",
                value: self.thickness,
            });
        }
        if !(self.height > 0.0) {
            return Err(DesignError::InvalidDimension {
                id: self.id.clone(),
                field: "height",
                value: self.height,
            });
        }

        let length = self.length();
        for opening in &self.openings {
            if !(opening.width > 0.0) {
                return Err(self.opening_error(
                    &opening.id,
                    format!("width {} must be > 0", opening.width),
                ));
            }
            if !(opening.offset >= 0.0 && opening.offset <= length) {
                return Err(self.opening_error(
                    &opening.id,
                    format!("offset {} outside wall length {:.1}", opening.offset, length),
                ));
            }
        }

        let mut sorted: Vec<&Opening> = self.openings.iter().collect();
        sorted.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        for pair in sorted.windows(2) {
            if pair[0].end() > pair[1].offset {
                return Err(self.opening_error(
                    &pair[1].id,
                    format!("overlaps opening '{}'", pair[0].id),
                ));
            }
        }
        Ok(())
    }

    /// Inserts an opening, keeping openings ordered by offset.
    ///
    /// The wall is left untouched when the opening is rejected.
    pub fn add_opening(&mut self, opening: Opening) -> Result<(), DesignError> {
        if self.openings.iter().any(|o| o.id == opening.id) {
            return Err(self.opening_error(&opening.id, "duplicate opening id".to_string()));
        }
        let mut candidate = self.clone();
        let index = candidate
            .openings
            .partition_point(|o| o.offset <= opening.offset);
        candidate.openings.insert(index, opening);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Removes an opening by id.
    pub fn remove_opening(&mut self, opening_id: &str) -> Result<Opening, DesignError> {
        let index = self
            .openings
            .iter()
            .position(|o| o.id == opening_id)
            .ok_or_else(|| DesignError::not_found("opening", opening_id))?;
        Ok(self.openings.remove(index))
    }

    pub(crate) fn sort_openings(&mut self) {
        self.openings.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    }
}

/// Partial update for a [`Wall`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallPatch {
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub thickness: Option<f64>,
    pub height: Option<f64>,
}

impl WallPatch {
    pub(crate) fn apply(&self, wall: &mut Wall) {
        if let Some(start) = self.start {
            wall.start = start;
        }
        if let Some(end) = self.end {
            wall.end = end;
        }
        if let Some(thickness) = self.thickness {
            wall.thickness = thickness;
        }
        if let Some(height) = self.height {
            wall.height = height;
        }
    }
}
