//! Editor configuration
//!
//! Provides configuration file handling and validation for the layout
//! editor. Supports JSON and TOML files; the default location is a
//! platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - History (undo depth)
//! - Viewport (grid, zoom bounds, snap defaults)
//! - Interaction (nudge and resize steps)
//! - Autosave (debounce delay, retention)
//! - Storage (revision store location)

use crate::error::ConfigError;
use crate::units::UnitSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo entries; the oldest is evicted past this
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

/// Viewport defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Grid spacing in model units
    pub grid_size: f64,
    /// Smallest zoom scale
    pub zoom_min: f64,
    /// Largest zoom scale
    pub zoom_max: f64,
    /// Increment applied by zoom in/out
    pub zoom_step: f64,
    /// Snap drag and resize to the grid
    pub snap_enabled: bool,
    /// Draw the background grid
    pub grid_visible: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            zoom_min: 0.2,
            zoom_max: 3.0,
            zoom_step: 0.1,
            snap_enabled: true,
            grid_visible: true,
        }
    }
}

/// Keyboard and pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Arrow-key nudge distance
    pub nudge_step: f64,
    /// Arrow-key nudge distance with a modifier held
    pub nudge_step_large: f64,
    /// Smallest width/height a resize gesture can produce
    pub min_resize: f64,
    /// Offset applied to duplicated elements
    pub duplicate_offset: f64,
    /// Padding around cabinets for generated countertops (mm)
    pub countertop_padding_mm: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            nudge_step: 2.0,
            nudge_step_large: 10.0,
            min_resize: 10.0,
            duplicate_offset: 20.0,
            countertop_padding_mm: 40.0,
        }
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    /// Quiet period before a dirty design is autosaved
    pub delay_ms: u64,
    /// Keep only the newest N autosave revisions; `None` keeps all
    pub retention: Option<usize>,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            retention: None,
        }
    }
}

impl AutosaveSettings {
    /// Debounce window as a [`Duration`]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Revision store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one sub-directory per design
    pub directory: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("planwright")
                .join("designs"),
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Units for newly created designs
    pub default_units: UnitSystem,
    pub history: HistorySettings,
    pub viewport: ViewportSettings,
    pub interaction: InteractionSettings,
    pub autosave: AutosaveSettings,
    pub storage: StorageSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("planwright")
            .join("config.toml")
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn out_of_range(key: &'static str, value: impl ToString) -> ConfigError {
            ConfigError::ValueOutOfRange {
                key,
                value: value.to_string(),
            }
        }

        if self.history.capacity == 0 {
            return Err(out_of_range("history.capacity", self.history.capacity));
        }

        let vp = &self.viewport;
        if vp.grid_size <= 0.0 {
            return Err(out_of_range("viewport.grid_size", vp.grid_size));
        }
        if vp.zoom_min <= 0.0 || vp.zoom_min > vp.zoom_max {
            return Err(out_of_range("viewport.zoom_min", vp.zoom_min));
        }
        if vp.zoom_step <= 0.0 {
            return Err(out_of_range("viewport.zoom_step", vp.zoom_step));
        }

        let ix = &self.interaction;
        if ix.nudge_step <= 0.0 || ix.nudge_step_large <= 0.0 {
            return Err(out_of_range("interaction.nudge_step", ix.nudge_step));
        }
        if ix.min_resize <= 0.0 {
            return Err(out_of_range("interaction.min_resize", ix.min_resize));
        }

        if self.autosave.delay_ms == 0 {
            return Err(out_of_range("autosave.delay_ms", self.autosave.delay_ms));
        }
        if self.autosave.retention == Some(0) {
            return Err(out_of_range("autosave.retention", 0));
        }

        Ok(())
    }
}
