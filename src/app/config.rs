//! Configuration management
//!
//! TOML configuration loaded from `~/.airtype/config.toml`, with
//! validated sections for the keyboard layout, the gesture emitter, and
//! the tracking surface.

use crate::gesture::sample::Surface;
use crate::layout::keyboard::LayoutSpec;
use crate::time::timebase::Interval;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keyboard layout section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Key rows, top to bottom; multi-character labels are action keys
    pub rows: Vec<Vec<String>>,
    /// Key side length in px
    pub key_width: f64,
    pub key_height: f64,
    /// Gap between adjacent keys in px
    pub margin: f64,
    /// Top-left corner of the first key
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let spec = LayoutSpec::default();
        Self {
            rows: spec.rows,
            key_width: spec.key_width,
            key_height: spec.key_height,
            margin: spec.margin,
            origin_x: spec.origin_x,
            origin_y: spec.origin_y,
        }
    }
}

/// Gesture emitter section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch closes when thumb and index tips are closer than this (px)
    pub touch_threshold_px: f64,
    /// Minimum interval between emitted keystrokes (ms)
    pub key_press_delay_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_threshold_px: 30.0,
            key_press_delay_ms: 500,
        }
    }
}

impl GestureConfig {
    pub fn press_delay(&self) -> Interval {
        Interval::from_millis(self.key_press_delay_ms)
    }
}

/// Tracking surface section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        let s = Surface::default();
        Self {
            width: s.width,
            height: s.height,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub gesture: GestureConfig,
    pub surface: SurfaceConfig,
}

impl Config {
    /// Default config file path: `~/.airtype/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(".airtype").join("config.toml"))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default path, falling back to defaults when the
    /// file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading config");
            Self::load(&path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.layout_spec().validate()?;
        if self.gesture.touch_threshold_px <= 0.0 {
            return Err(Error::Config(format!(
                "touch_threshold_px must be positive, got {}",
                self.gesture.touch_threshold_px
            )));
        }
        if self.surface.width <= 0.0 || self.surface.height <= 0.0 {
            return Err(Error::Config(format!(
                "surface dimensions must be positive, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        Ok(())
    }

    /// The layout section as a buildable spec.
    pub fn layout_spec(&self) -> LayoutSpec {
        LayoutSpec {
            rows: self.layout.rows.clone(),
            key_width: self.layout.key_width,
            key_height: self.layout.key_height,
            margin: self.layout.margin,
            origin_x: self.layout.origin_x,
            origin_y: self.layout.origin_y,
        }
    }

    /// The surface section as a surface size.
    pub fn surface_size(&self) -> Surface {
        Surface::new(self.surface.width, self.surface.height)
    }
}
