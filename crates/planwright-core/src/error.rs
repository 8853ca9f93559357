//! Error handling for Planwright
//!
//! Provides error types for every layer of the editor:
//! - Design errors (entity lookup, dimension and opening validation)
//! - Persistence errors (design/revision storage)
//! - Configuration errors (loading and validating editor settings)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Degenerate geometry is deliberately absent: polygons with fewer than
//! three points evaluate to zero area and perimeter instead of failing.

use thiserror::Error;

/// Design error type
///
/// Raised by id-targeted operations on the in-memory design model. These
/// are absorbed by the editing session (logged and returned), never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// Referenced entity, node or catalog spec does not exist
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// The kind of thing that was looked up.
        kind: &'static str,
        /// The id that was not found.
        id: String,
    },

    /// A patch was applied to an entity of a different kind
    #[error("Entity '{id}' is a {actual}, not a {expected}")]
    KindMismatch {
        /// The entity id.
        id: String,
        /// The kind the patch targets.
        expected: &'static str,
        /// The kind actually stored under the id.
        actual: &'static str,
    },

    /// A dimension that must be strictly positive was not
    #[error("Invalid {field} for '{id}': {value} (must be > 0)")]
    InvalidDimension {
        /// The entity id.
        id: String,
        /// The dimension name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Opening violates wall placement rules
    #[error("Invalid opening '{opening_id}' on wall '{wall_id}': {reason}")]
    InvalidOpening {
        /// The wall id.
        wall_id: String,
        /// The opening id.
        opening_id: String,
        /// Why the opening was rejected.
        reason: String,
    },

    /// Property edit rejected by the node field schema
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField {
        /// The field key.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Element cannot be moved or resized interactively
    #[error("Element '{id}' cannot be moved or resized")]
    NotMovable {
        /// The element id.
        id: String,
    },

    /// Operation requires a selection
    #[error("No element selected")]
    NoSelection,
}

impl DesignError {
    /// Convenience constructor for [`DesignError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DesignError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Persistence error type
///
/// Represents failures of the design/revision storage collaborator.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Design does not exist or is archived
    #[error("Design not found: {design_id}")]
    DesignNotFound {
        /// The design id.
        design_id: String,
    },

    /// Revision does not exist for the design
    #[error("Revision {revision_id} not found for design {design_id}")]
    RevisionNotFound {
        /// The design id.
        design_id: String,
        /// The revision id.
        revision_id: String,
    },

    /// Template id supplied on create is unknown
    #[error("Invalid template: {template_id}")]
    InvalidTemplate {
        /// The template id.
        template_id: String,
    },

    /// Another writer already stored a revision with the same index
    #[error("Revision conflict: expected index {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The index the writer expected to append after.
        expected: u64,
        /// The index actually at the head.
        actual: u64,
    },

    /// Storage backend failure
    #[error("Storage error: {reason}")]
    Storage {
        /// A description of the failure.
        reason: String,
    },

    /// Storage I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    /// Create a storage error from a message
    pub fn storage(reason: impl Into<String>) -> Self {
        PersistenceError::Storage {
            reason: reason.into(),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON config could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config could not be parsed
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML config could not be written
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// File extension is not .json or .toml
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its valid range
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange {
        /// The setting name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Main error type for Planwright
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Design model error
    #[error(transparent)]
    Design(#[from] DesignError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a "not found" error of any layer
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Design(DesignError::NotFound { .. })
                | Error::Persistence(PersistenceError::DesignNotFound { .. })
                | Error::Persistence(PersistenceError::RevisionNotFound { .. })
        )
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
