//! Structural edits for the designer session.

use super::DesignerSession;
use crate::model::{
    generate_id, CountertopSurface, Entity, EntityPatch, LegacyNode, NodeKind, NodePatch, Opening,
};
use crate::shortcuts::NudgeDirection;
use crate::viewport::ScreenPoint;
use planwright_core::{Bounds, DesignError, Point, UnitSystem};

/// Screen anchor where new legacy nodes appear.
const NODE_ANCHOR: ScreenPoint = ScreenPoint::new(80.0, 80.0);
/// Screen anchor where catalog cabinets are placed.
const CABINET_ANCHOR: ScreenPoint = ScreenPoint::new(120.0, 120.0);

/// Id of the countertop generated from the cabinet layout.
pub const GENERATED_COUNTERTOP_ID: &str = "ct_auto";
const GENERATED_COUNTERTOP_THICKNESS: f64 = 30.0;

fn translate_entity(entity: Entity, dx: f64, dy: f64) -> Entity {
    let shift = |p: &mut Point| {
        p.x += dx;
        p.y += dy;
    };
    match entity {
        Entity::Wall(mut w) => {
            shift(&mut w.start);
            shift(&mut w.end);
            for opening in &mut w.openings {
                opening.id = generate_id("opening");
            }
            Entity::Wall(w)
        }
        Entity::Cabinet(mut c) => {
            c.x += dx;
            c.y += dy;
            Entity::Cabinet(c)
        }
        Entity::Countertop(mut c) => {
            c.polygon.iter_mut().for_each(shift);
            for cutout in &mut c.cutouts {
                cutout.x += dx;
                cutout.y += dy;
                cutout.id = generate_id("cutout");
            }
            Entity::Countertop(c)
        }
        Entity::TileSurface(mut t) => {
            t.polygon.iter_mut().for_each(shift);
            Entity::TileSurface(t)
        }
    }
}

impl DesignerSession {
    fn anchor_in_model(&self, anchor: ScreenPoint) -> Point {
        let p = self.viewport.screen_to_model(anchor);
        Point::new(p.x.round(), p.y.round())
    }

    fn require_selection(&self) -> Result<String, DesignError> {
        self.selection.clone().ok_or(DesignError::NoSelection)
    }

    /// Adds a structured entity and returns its id.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) -> Result<String, DesignError> {
        let entity = entity.into();
        let action = format!("Add {}", entity.kind());
        self.commit_with(&action, |canvas| canvas.state.add(entity))
    }

    pub fn update_entity(
        &mut self,
        id: &str,
        patch: impl Into<EntityPatch>,
    ) -> Result<(), DesignError> {
        let patch = patch.into();
        self.commit_with("Update entity", |canvas| canvas.state.update(id, patch))
    }

    pub fn remove_entity(&mut self, id: &str) -> Result<Entity, DesignError> {
        let removed = self.commit_with("Remove entity", |canvas| canvas.state.remove(id))?;
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        Ok(removed)
    }

    pub fn add_opening(&mut self, wall_id: &str, opening: Opening) -> Result<String, DesignError> {
        self.commit_with("Add opening", |canvas| {
            canvas.state.add_opening(wall_id, opening)
        })
    }

    pub fn remove_opening(
        &mut self,
        wall_id: &str,
        opening_id: &str,
    ) -> Result<Opening, DesignError> {
        self.commit_with("Remove opening", |canvas| {
            canvas.state.remove_opening(wall_id, opening_id)
        })
    }

    /// Places a catalog cabinet at the cabinet anchor and selects it.
    pub fn place_catalog_cabinet(&mut self, spec_id: &str) -> Result<String, DesignError> {
        let at = self.anchor_in_model(CABINET_ANCHOR);
        self.place_catalog_cabinet_at(spec_id, at)
    }

    pub fn place_catalog_cabinet_at(
        &mut self,
        spec_id: &str,
        at: Point,
    ) -> Result<String, DesignError> {
        let catalog = self.catalog.clone();
        let id = self.commit_with("Place catalog cabinet", |canvas| {
            let cabinet = catalog.instantiate(spec_id, at.x, at.y)?;
            canvas.state.add(cabinet)
        })?;
        self.selection = Some(id.clone());
        Ok(id)
    }

    /// Adds a legacy node with its kind defaults at the node anchor and
    /// selects it.
    pub fn add_node(&mut self, kind: NodeKind) -> String {
        let at = self.anchor_in_model(NODE_ANCHOR);
        let node = LegacyNode::new(kind, generate_id("node"), at.x, at.y);
        let id = node.id().to_string();
        let result = self.commit_with("Add node", |canvas| Ok(canvas.add_node(node)));
        if result.is_ok() {
            self.selection = Some(id.clone());
        }
        id
    }

    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<(), DesignError> {
        self.commit_with("Update node", |canvas| canvas.update_node(id, &patch))
    }

    /// Sets one inspector field from raw input, validated by the node
    /// kind's field schema.
    pub fn set_node_field(&mut self, id: &str, key: &str, raw: &str) -> Result<(), DesignError> {
        let kind = self
            .canvas
            .node(id)
            .map(LegacyNode::kind)
            .ok_or_else(|| DesignError::not_found("node", id))?;
        let patch = NodePatch::from_field(kind, key, raw)?;
        self.update_node(id, patch)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<LegacyNode, DesignError> {
        let removed = self.commit_with("Remove node", |canvas| canvas.remove_node(id))?;
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        Ok(removed)
    }

    /// Removes the selected node or entity.
    pub fn delete_selection(&mut self) -> Result<(), DesignError> {
        let id = self.require_selection()?;
        self.commit_with("Delete selection", |canvas| {
            if canvas.nodes.contains_key(&id) {
                canvas.remove_node(&id).map(|_| ())
            } else {
                canvas.state.remove(&id).map(|_| ())
            }
        })?;
        self.selection = None;
        Ok(())
    }

    /// Copies the selection offset by the duplicate offset, selecting the
    /// copy.
    pub fn duplicate_selection(&mut self) -> Result<String, DesignError> {
        let id = self.require_selection()?;
        let offset = self.interaction.duplicate_offset;
        let copy_id = self.commit_with("Duplicate selection", |canvas| {
            if let Some(node) = canvas.node(&id) {
                let mut copy = node.clone();
                copy.set_id(generate_id("node"));
                let at = copy.position();
                NodePatch::position(at.x + offset, at.y + offset).apply(&mut copy)?;
                return Ok(canvas.add_node(copy));
            }
            let entity = canvas
                .state
                .get(&id)
                .ok_or_else(|| DesignError::not_found("element", id.as_str()))?;
            let prefix = match &entity {
                Entity::Wall(_) => "wall",
                Entity::Cabinet(_) => "cab",
                Entity::Countertop(_) => "ct",
                Entity::TileSurface(_) => "tile",
            };
            let copy = translate_entity(entity, offset, offset).with_id(generate_id(prefix));
            canvas.state.add(copy)
        })?;
        self.selection = Some(copy_id.clone());
        Ok(copy_id)
    }

    /// Moves the selection by one nudge step; each call is its own commit.
    pub fn nudge(&mut self, direction: NudgeDirection, large: bool) -> Result<(), DesignError> {
        let id = self.require_selection()?;
        let step = if large {
            self.interaction.nudge_step_large
        } else {
            self.interaction.nudge_step
        };
        let (ux, uy) = direction.unit();
        self.commit_with("Nudge", |canvas| {
            let p = canvas.position_of(&id)?;
            canvas.set_position(&id, Point::new(p.x + ux * step, p.y + uy * step))
        })
    }

    /// Creates (or replaces) a countertop covering all cabinet footprints,
    /// padded outward. Returns `None` when there are no cabinets.
    ///
    /// Footprints are taken unrotated.
    pub fn generate_countertop_from_cabinets(&mut self) -> Option<String> {
        let bounds = self
            .canvas
            .state
            .cabinets
            .values()
            .map(|c| Bounds::new(c.x, c.y, c.x + c.width, c.y + c.depth))
            .reduce(|a, b| a.union(&b))?;
        let padded = bounds.padded(self.interaction.countertop_padding_mm);

        let mut surface = CountertopSurface::new(padded.to_polygon(), GENERATED_COUNTERTOP_THICKNESS);
        surface.id = GENERATED_COUNTERTOP_ID.to_string();
        self.commit_with("Generate countertop", |canvas| canvas.state.add(surface))
            .ok()
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        if self.canvas.state.settings.units == units {
            return;
        }
        let _ = self.commit_with("Set units", |canvas| {
            canvas.state.settings.units = units;
            Ok(())
        });
    }
}
