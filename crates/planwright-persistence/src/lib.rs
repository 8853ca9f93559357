//! # Planwright Persistence
//!
//! Append-only revision storage for designs and the editor context that
//! drives it: a gateway trait with in-memory and file-backed stores, dirty
//! tracking by edit generation, a debounced autosave task and the exit
//! guard.

pub mod autosave;
pub mod dirty;
pub mod editor;
pub mod file_store;
pub mod gateway;
pub mod memory;
pub mod model;

pub use autosave::{AutosaveScheduler, SaveStatus};
pub use dirty::DirtyTracker;
pub use editor::{DesignEditor, ExitDecision};
pub use file_store::FileDesignStore;
pub use gateway::DesignGateway;
pub use memory::MemoryDesignStore;
pub use model::{
    overlay_canvas, CreateDesign, Design, DesignRevision, DesignStatus, DesignTemplate,
    LoadedDesign, RevisionMeta, DEFAULT_TITLE,
};
