//! # Planwright Core
//!
//! Core types and utilities shared by the layout editor crates:
//! the error taxonomy, unit conversion and dimension formatting,
//! plan-view geometry, and editor configuration.

pub mod config;
pub mod error;
pub mod geometry;
pub mod units;

pub use config::{
    AutosaveSettings, EditorConfig, HistorySettings, InteractionSettings, StorageSettings,
    ViewportSettings,
};
pub use error::{ConfigError, DesignError, Error, PersistenceError, Result};
pub use geometry::{bounds_of, perimeter, polygon_area, Bounds, Point};
pub use units::{
    format_dimension, inches_to_mm, mm_to_feet, mm_to_inches, parse_length, round_to,
    sq_mm_to_sq_ft, unit_label, UnitSystem, MM_PER_FOOT, MM_PER_INCH, SQ_MM_PER_SQ_FT,
};
