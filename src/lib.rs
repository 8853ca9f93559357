//! # Planwright
//!
//! Parametric interior layout editor with quantity takeoff and revisioned
//! autosave.
//!
//! ## Architecture
//!
//! Planwright is organized as a workspace with multiple crates:
//!
//! 1. **planwright-core** - Errors, units, plan geometry, configuration
//! 2. **planwright-designer** - Layout model, catalog, editing session, takeoff
//! 3. **planwright-persistence** - Revision storage, autosave, exit guard
//! 4. **planwright** - Binary wiring the crates together

pub use planwright_core as core;
pub use planwright_designer as designer;
pub use planwright_persistence as persistence;

pub use planwright_core::{
    ConfigError, DesignError, EditorConfig, Error, PersistenceError, Point, Result, UnitSystem,
};
pub use planwright_designer::{
    compute_takeoff, CanvasData, CatalogRegistry, DesignState, DesignerSession, Takeoff,
};
pub use planwright_persistence::{
    CreateDesign, DesignEditor, DesignGateway, ExitDecision, FileDesignStore, MemoryDesignStore,
    SaveStatus,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the default `info` level; `PLANWRIGHT_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("PLANWRIGHT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}
