//! # Planwright Designer
//!
//! Parametric layout model and interactive editing for interior design
//! plans: walls with openings, cabinets, countertops and tile surfaces,
//! legacy room/door/window nodes, a cabinet catalog, undo/redo over full
//! snapshots, pan/zoom/snap viewport control, pointer gestures, keyboard
//! shortcuts and quantity takeoff.

pub mod canvas;
pub mod catalog;
pub mod design_state;
pub mod gesture;
pub mod history;
pub mod model;
pub mod session;
pub mod shortcuts;
pub mod takeoff;
pub mod viewport;

pub use canvas::CanvasData;
pub use catalog::{CatalogCabinetSpec, CatalogRegistry};
pub use design_state::{DesignSettings, DesignState};
pub use gesture::{Gesture, PanTrigger, PointerButton};
pub use history::{BoundedStack, History};
pub use model::{
    Cabinet, CabinetMount, CabinetPatch, CountertopPatch, CountertopSurface, Cutout, CutoutType,
    Entity, EntityKind, EntityPatch, LegacyNode, NodeKind, NodePatch, Opening, OpeningType, RawNode,
    TileSurface, TileSurfacePatch, Wall, WallPatch,
};
pub use session::DesignerSession;
pub use shortcuts::{EditorAction, KeyInput, NudgeDirection};
pub use takeoff::{cabinet_linear_feet, compute_takeoff, Takeoff, TakeoffItem, TakeoffSummary, TakeoffUnit};
pub use viewport::{ScreenPoint, Viewport};
