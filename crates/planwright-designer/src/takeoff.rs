//! Quantity takeoff.
//!
//! Derives material quantities from a [`DesignState`]. The computation is a
//! pure function of its input: no randomness, no I/O, and ordered map
//! iteration keeps float accumulation deterministic.
//!
//! Cabinet run length uses `width / 25.4 / 12`, which ignores rotation and
//! wall-run adjacency. Tile surfaces are not included.

use crate::design_state::DesignState;
use crate::model::Cabinet;
use planwright_core::{mm_to_inches, round_to, sq_mm_to_sq_ft, MM_PER_FOOT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of a takeoff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TakeoffUnit {
    Each,
    #[serde(rename = "lf")]
    LinearFeet,
    #[serde(rename = "sqft")]
    SquareFeet,
}

impl fmt::Display for TakeoffUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Each => "ea",
            Self::LinearFeet => "LF",
            Self::SquareFeet => "sq ft",
        })
    }
}

/// One estimate line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffItem {
    pub code: String,
    pub description: String,
    pub quantity: f64,
    pub unit: TakeoffUnit,
}

impl TakeoffItem {
    fn new(code: &str, description: &str, quantity: f64, unit: TakeoffUnit) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            quantity,
            unit,
        }
    }
}

/// Headline totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeoffSummary {
    pub cabinet_count: usize,
    #[serde(rename = "cabinetLF")]
    pub cabinet_lf: f64,
    pub countertop_area_sq_ft: f64,
    #[serde(rename = "countertopEdgeLF")]
    pub countertop_edge_lf: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Takeoff {
    pub items: Vec<TakeoffItem>,
    pub summary: TakeoffSummary,
}

impl fmt::Display for Takeoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{:<20} {:>10.2} {}", item.description, item.quantity, item.unit)?;
        }
        Ok(())
    }
}

/// Run length contributed by one cabinet, in feet (unrounded).
pub fn cabinet_linear_feet(cabinet: &Cabinet) -> f64 {
    mm_to_inches(cabinet.width) / 12.0
}

/// Computes the takeoff for a design.
pub fn compute_takeoff(state: &DesignState) -> Takeoff {
    let cabinet_count = state.cabinets.len();
    let cabinet_lf = round_to(state.cabinets.values().map(cabinet_linear_feet).sum(), 2);

    let mut items = vec![
        TakeoffItem::new("CAB-COUNT", "Cabinets", cabinet_count as f64, TakeoffUnit::Each),
        TakeoffItem::new("CAB-LF", "Cabinet run", cabinet_lf, TakeoffUnit::LinearFeet),
    ];

    let (area_mm2, edge_mm) = state
        .countertops
        .values()
        .fold((0.0, 0.0), |(area, edge), ct| (area + ct.area(), edge + ct.edge_length()));
    let countertop_area_sq_ft = round_to(sq_mm_to_sq_ft(area_mm2), 2);
    let countertop_edge_lf = round_to(edge_mm / MM_PER_FOOT, 2);

    if !state.countertops.is_empty() {
        items.push(TakeoffItem::new(
            "CT-AREA",
            "Countertop area",
            countertop_area_sq_ft,
            TakeoffUnit::SquareFeet,
        ));
        items.push(TakeoffItem::new(
            "CT-EDGE",
            "Countertop edge",
            countertop_edge_lf,
            TakeoffUnit::LinearFeet,
        ));
    }

    Takeoff {
        items,
        summary: TakeoffSummary {
            cabinet_count,
            cabinet_lf,
            countertop_area_sq_ft,
            countertop_edge_lf,
        },
    }
}
