//! Configuration management for candlescape.
//!
//! Loads configuration from TOML files. Every section and field is optional;
//! missing values fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub lighting: LightingConfig,
    pub camera: CameraConfig,
    pub data: DataConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Candidate config file locations, in search order:
    /// 1. `./config.toml`
    /// 2. `~/.config/candlescape/config.toml` (platform config dir)
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_path()];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("candlescape").join("config.toml"));
        }
        paths
    }

    /// First existing file among [`Config::search_paths`].
    pub fn locate() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|path| path.is_file())
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Candlescape".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Scene layout and colors. Colors are linear RGBA in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Distance between adjacent candles along X.
    pub spacing: f32,
    /// World-space height the price range is mapped onto.
    pub vertical_range: f32,
    pub bullish_color: [f32; 4],
    pub bearish_color: [f32; 4],
    pub wick_color: [f32; 4],
    pub background_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spacing: 1.2,
            vertical_range: 10.0,
            bullish_color: [0.0, 1.0, 0.0, 1.0],
            bearish_color: [1.0, 0.0, 0.0, 1.0],
            wick_color: [0.0, 0.0, 0.0, 1.0],
            background_color: [0.85, 0.8, 0.75, 1.0],
        }
    }
}

/// Directional light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction towards the light; normalized on upload.
    pub direction: [f32; 3],
    /// Ambient term in `[0, 1]`.
    pub ambient: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: [0.0, 1.0, 1.0],
            ambient: 0.3,
        }
    }
}

/// Camera response and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians per pixel of mouse drag.
    pub drag_sensitivity: f32,
    /// World units per scroll pixel.
    pub zoom_speed: f32,
    /// World units per frame while a movement key is held.
    pub move_speed: f32,
    /// Closest allowed camera Z.
    pub min_zoom: f32,
    /// Farthest allowed camera Z.
    pub max_zoom: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Pixels per wheel line for line-based scroll devices.
    pub scroll_line_pixels: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.001,
            zoom_speed: 0.1,
            move_speed: 0.1,
            min_zoom: 1.0,
            max_zoom: 50.0,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
            scroll_line_pixels: 20.0,
        }
    }
}

/// Candle data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file to load; the built-in sample set is used when unset.
    pub csv_path: Option<PathBuf>,
    /// Number of sample candles to generate.
    pub sample_count: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            sample_count: 102,
        }
    }
}
