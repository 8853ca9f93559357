//! Canonical in-memory spatial model.
//!
//! `DesignState` is the aggregate root: the unit of undo/redo and (together
//! with legacy nodes) of persistence. All operations are synchronous and
//! atomic; a rejected update leaves the state untouched.

use crate::model::{
    CabinetPatch, Cabinet, CountertopSurface, Entity, EntityKind, EntityPatch, Opening,
    TileSurface, Wall,
};
use planwright_core::{DesignError, UnitSystem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-design display settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    pub units: UnitSystem,
}

/// The structured design model. Maps are ordered so iteration (and
/// therefore takeoff and serialization) is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignState {
    pub walls: BTreeMap<String, Wall>,
    pub cabinets: BTreeMap<String, Cabinet>,
    pub countertops: BTreeMap<String, CountertopSurface>,
    pub tile_surfaces: BTreeMap<String, TileSurface>,
    pub settings: DesignSettings,
}

impl DesignState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: UnitSystem) -> Self {
        Self {
            settings: DesignSettings { units },
            ..Self::default()
        }
    }

    /// Which map holds `id`, if any.
    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        if self.walls.contains_key(id) {
            Some(EntityKind::Wall)
        } else if self.cabinets.contains_key(id) {
            Some(EntityKind::Cabinet)
        } else if self.countertops.contains_key(id) {
            Some(EntityKind::Countertop)
        } else if self.tile_surfaces.contains_key(id) {
            Some(EntityKind::TileSurface)
        } else {
            None
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kind_of(id).is_some()
    }

    /// Owned copy of an entity.
    pub fn get(&self, id: &str) -> Option<Entity> {
        match self.kind_of(id)? {
            EntityKind::Wall => self.walls.get(id).cloned().map(Entity::Wall),
            EntityKind::Cabinet => self.cabinets.get(id).cloned().map(Entity::Cabinet),
            EntityKind::Countertop => self.countertops.get(id).cloned().map(Entity::Countertop),
            EntityKind::TileSurface => {
                self.tile_surfaces.get(id).cloned().map(Entity::TileSurface)
            }
        }
    }

    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.get(id)
    }

    pub fn cabinet(&self, id: &str) -> Option<&Cabinet> {
        self.cabinets.get(id)
    }

    pub fn countertop(&self, id: &str) -> Option<&CountertopSurface> {
        self.countertops.get(id)
    }

    pub fn tile_surface(&self, id: &str) -> Option<&TileSurface> {
        self.tile_surfaces.get(id)
    }

    /// Inserts an entity, returning its id.
    ///
    /// Re-adding an id of the same kind replaces the stored entity; an id
    /// already used by another kind is rejected.
    pub fn add(&mut self, entity: impl Into<Entity>) -> Result<String, DesignError> {
        let entity = entity.into();
        entity.validate()?;

        let id = entity.id().to_string();
        if let Some(existing) = self.kind_of(&id) {
            if existing != entity.kind() {
                return Err(DesignError::KindMismatch {
                    id,
                    expected: entity.kind().as_str(),
                    actual: existing.as_str(),
                });
            }
        }

        match entity {
            Entity::Wall(mut w) => {
                w.sort_openings();
                self.walls.insert(id.clone(), w);
            }
            Entity::Cabinet(c) => {
                self.cabinets.insert(id.clone(), c);
            }
            Entity::Countertop(c) => {
                self.countertops.insert(id.clone(), c);
            }
            Entity::TileSurface(t) => {
                self.tile_surfaces.insert(id.clone(), t);
            }
        }
        Ok(id)
    }

    /// Shallow-merges `patch` into the entity `id`.
    pub fn update(&mut self, id: &str, patch: impl Into<EntityPatch>) -> Result<(), DesignError> {
        let patch = patch.into();
        let actual = self
            .kind_of(id)
            .ok_or_else(|| DesignError::not_found(patch.kind().as_str(), id))?;
        if actual != patch.kind() {
            return Err(DesignError::KindMismatch {
                id: id.to_string(),
                expected: patch.kind().as_str(),
                actual: actual.as_str(),
            });
        }

        match patch {
            EntityPatch::Wall(p) => {
                if let Some(wall) = self.walls.get_mut(id) {
                    let mut next = wall.clone();
                    p.apply(&mut next);
                    next.validate()?;
                    *wall = next;
                }
            }
            EntityPatch::Cabinet(p) => {
                if let Some(cabinet) = self.cabinets.get_mut(id) {
                    let mut next = cabinet.clone();
                    p.apply(&mut next);
                    next.validate()?;
                    *cabinet = next;
                }
            }
            EntityPatch::Countertop(p) => {
                if let Some(surface) = self.countertops.get_mut(id) {
                    let mut next = surface.clone();
                    p.apply(&mut next);
                    next.validate()?;
                    *surface = next;
                }
            }
            EntityPatch::TileSurface(p) => {
                if let Some(surface) = self.tile_surfaces.get_mut(id) {
                    p.apply(surface);
                }
            }
        }
        Ok(())
    }

    /// Moves a cabinet; shorthand for a position-only patch.
    pub fn move_cabinet(&mut self, id: &str, x: f64, y: f64) -> Result<(), DesignError> {
        self.update(id, CabinetPatch::position(x, y))
    }

    pub fn remove(&mut self, id: &str) -> Result<Entity, DesignError> {
        let removed = match self.kind_of(id) {
            Some(EntityKind::Wall) => self.walls.remove(id).map(Entity::Wall),
            Some(EntityKind::Cabinet) => self.cabinets.remove(id).map(Entity::Cabinet),
            Some(EntityKind::Countertop) => self.countertops.remove(id).map(Entity::Countertop),
            Some(EntityKind::TileSurface) => {
                self.tile_surfaces.remove(id).map(Entity::TileSurface)
            }
            None => None,
        };
        removed.ok_or_else(|| DesignError::not_found("entity", id))
    }

    pub fn add_opening(&mut self, wall_id: &str, opening: Opening) -> Result<String, DesignError> {
        let wall = self
            .walls
            .get_mut(wall_id)
            .ok_or_else(|| DesignError::not_found("wall", wall_id))?;
        let id = opening.id.clone();
        wall.add_opening(opening)?;
        Ok(id)
    }

    pub fn remove_opening(
        &mut self,
        wall_id: &str,
        opening_id: &str,
    ) -> Result<Opening, DesignError> {
        self.walls
            .get_mut(wall_id)
            .ok_or_else(|| DesignError::not_found("wall", wall_id))?
            .remove_opening(opening_id)
    }

    pub fn entity_count(&self) -> usize {
        self.walls.len() + self.cabinets.len() + self.countertops.len() + self.tile_surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Removes every entity, keeping settings.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.cabinets.clear();
        self.countertops.clear();
        self.tile_surfaces.clear();
    }

    pub(crate) fn normalize(&mut self) {
        for wall in self.walls.values_mut() {
            wall.sort_openings();
        }
    }
}
