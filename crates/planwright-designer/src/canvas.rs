//! Canvas data: the snapshot type of undo history and the payload of a
//! persisted revision.
//!
//! The legacy `{nodes: {...}}` shape and the structured
//! `{walls, cabinets, countertops, tileSurfaces, settings}` shape share one
//! JSON document; either may be absent. Legacy nodes are read through
//! [`LegacyNode::from_value`] and written back with every stored field.

use crate::design_state::DesignState;
use crate::model::{CabinetPatch, LegacyNode, NodePatch};
use planwright_core::{DesignError, Point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Structured design state plus the legacy node map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawCanvasData")]
pub struct CanvasData {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, LegacyNode>,
    #[serde(flatten)]
    pub state: DesignState,
}

#[derive(Deserialize)]
struct RawCanvasData {
    #[serde(default)]
    nodes: Option<Map<String, Value>>,
    #[serde(flatten)]
    state: DesignState,
}

impl From<RawCanvasData> for CanvasData {
    fn from(raw: RawCanvasData) -> Self {
        let mut nodes = BTreeMap::new();
        for (key, value) in raw.nodes.unwrap_or_default() {
            let node = LegacyNode::from_value(&key, value);
            nodes.insert(key, node);
        }
        let mut state = raw.state;
        state.normalize();
        Self { nodes, state }
    }
}

impl CanvasData {
    pub fn new(state: DesignState) -> Self {
        Self {
            nodes: BTreeMap::new(),
            state,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.state.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Whether `id` names a legacy node or a structured entity.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id) || self.state.contains(id)
    }

    pub fn node(&self, id: &str) -> Option<&LegacyNode> {
        self.nodes.get(id)
    }

    pub fn add_node(&mut self, node: LegacyNode) -> String {
        let id = node.id().to_string();
        self.nodes.insert(id.clone(), node);
        id
    }

    pub fn update_node(&mut self, id: &str, patch: &NodePatch) -> Result<(), DesignError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| DesignError::not_found("node", id))?;
        patch.apply(node)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<LegacyNode, DesignError> {
        self.nodes
            .remove(id)
            .ok_or_else(|| DesignError::not_found("node", id))
    }

    /// Top-left position of a node or cabinet.
    pub fn position_of(&self, id: &str) -> Result<Point, DesignError> {
        if let Some(node) = self.nodes.get(id) {
            return Ok(node.position());
        }
        if let Some(cab) = self.state.cabinet(id) {
            return Ok(Point::new(cab.x, cab.y));
        }
        Err(self.not_placeable(id))
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), DesignError> {
        if self.nodes.contains_key(id) {
            return self.update_node(id, &NodePatch::position(position.x, position.y));
        }
        if self.state.cabinet(id).is_some() {
            return self
                .state
                .update(id, CabinetPatch::position(position.x, position.y));
        }
        Err(self.not_placeable(id))
    }

    /// Plan footprint `(w, h)`; a cabinet's is `(width, depth)`.
    pub fn size_of(&self, id: &str) -> Result<(f64, f64), DesignError> {
        if let Some(node) = self.nodes.get(id) {
            return Ok(node.size());
        }
        if let Some(cab) = self.state.cabinet(id) {
            return Ok((cab.width, cab.depth));
        }
        Err(self.not_placeable(id))
    }

    pub fn set_size(&mut self, id: &str, w: f64, h: f64) -> Result<(), DesignError> {
        if self.nodes.contains_key(id) {
            return self.update_node(id, &NodePatch::size(w, h));
        }
        if self.state.cabinet(id).is_some() {
            return self.state.update(
                id,
                CabinetPatch {
                    width: Some(w),
                    depth: Some(h),
                    ..CabinetPatch::default()
                },
            );
        }
        Err(self.not_placeable(id))
    }

    fn not_placeable(&self, id: &str) -> DesignError {
        if self.state.contains(id) {
            DesignError::NotMovable { id: id.to_string() }
        } else {
            DesignError::not_found("element", id)
        }
    }
}

impl From<DesignState> for CanvasData {
    fn from(state: DesignState) -> Self {
        Self::new(state)
    }
}
