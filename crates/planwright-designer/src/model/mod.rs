//! Spatial entity model.
//!
//! Structured entities (walls, cabinets, countertops, tile surfaces) live in
//! [`crate::DesignState`]; free-form legacy nodes live alongside them in
//! [`crate::CanvasData`].

mod cabinet;
mod countertop;
mod legacy;
mod wall;

pub use cabinet::{Cabinet, CabinetMount, CabinetPatch, Drawer};
pub use countertop::{
    CountertopPatch, CountertopSurface, Cutout, CutoutType, TileSurface, TileSurfacePatch,
};
pub use legacy::{
    DoorNode, DoorSwing, FieldInput, FieldMeta, LegacyNode, NodeDefaults, NodeFrame, NodeKind,
    NodePatch, RawNode, RoomNode, WindowNode, WindowStyle,
};
pub use wall::{Opening, OpeningType, Wall, WallPatch};

use planwright_core::DesignError;
use std::fmt;

/// Generates a session-unique id such as `cab_3f2a9c...`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Kind of a structured entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Wall,
    Cabinet,
    Countertop,
    TileSurface,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Cabinet => "cabinet",
            Self::Countertop => "countertop",
            Self::TileSurface => "tile surface",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any structured entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Wall(Wall),
    Cabinet(Cabinet),
    Countertop(CountertopSurface),
    TileSurface(TileSurface),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Self::Wall(w) => &w.id,
            Self::Cabinet(c) => &c.id,
            Self::Countertop(c) => &c.id,
            Self::TileSurface(t) => &t.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Wall(_) => EntityKind::Wall,
            Self::Cabinet(_) => EntityKind::Cabinet,
            Self::Countertop(_) => EntityKind::Countertop,
            Self::TileSurface(_) => EntityKind::TileSurface,
        }
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        match self {
            Self::Wall(w) => w.validate(),
            Self::Cabinet(c) => c.validate(),
            Self::Countertop(c) => c.validate(),
            Self::TileSurface(_) => Ok(()),
        }
    }

    /// Same entity content under a different id.
    pub(crate) fn with_id(mut self, id: String) -> Self {
        match &mut self {
            Self::Wall(w) => w.id = id,
            Self::Cabinet(c) => c.id = id,
            Self::Countertop(c) => c.id = id,
            Self::TileSurface(t) => t.id = id,
        }
        self
    }
}

impl From<Wall> for Entity {
    fn from(wall: Wall) -> Self {
        Self::Wall(wall)
    }
}

impl From<Cabinet> for Entity {
    fn from(cabinet: Cabinet) -> Self {
        Self::Cabinet(cabinet)
    }
}

impl From<CountertopSurface> for Entity {
    fn from(surface: CountertopSurface) -> Self {
        Self::Countertop(surface)
    }
}

impl From<TileSurface> for Entity {
    fn from(surface: TileSurface) -> Self {
        Self::TileSurface(surface)
    }
}

/// Shallow-merge update targeting one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityPatch {
    Wall(WallPatch),
    Cabinet(CabinetPatch),
    Countertop(CountertopPatch),
    TileSurface(TileSurfacePatch),
}

impl EntityPatch {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Wall(_) => EntityKind::Wall,
            Self::Cabinet(_) => EntityKind::Cabinet,
            Self::Countertop(_) => EntityKind::Countertop,
            Self::TileSurface(_) => EntityKind::TileSurface,
        }
    }
}

impl From<WallPatch> for EntityPatch {
    fn from(patch: WallPatch) -> Self {
        Self::Wall(patch)
    }
}

impl From<CabinetPatch> for EntityPatch {
    fn from(patch: CabinetPatch) -> Self {
        Self::Cabinet(patch)
    }
}

impl From<CountertopPatch> for EntityPatch {
    fn from(patch: CountertopPatch) -> Self {
        Self::Countertop(patch)
    }
}

impl From<TileSurfacePatch> for EntityPatch {
    fn from(patch: TileSurfacePatch) -> Self {
        Self::TileSurface(patch)
    }
}
