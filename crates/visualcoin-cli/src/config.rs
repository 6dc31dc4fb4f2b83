//! TOML configuration for the CLI.
//!
//! Every section and key is optional. Command-line flags win over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use visualcoin::{Color, RasterCanvas, TreemapOptions, TreemapStyle};

/// Errors loading or validating a config file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Width or height is zero.
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Width or height is above the raster limit.
    #[error("canvas size {width}x{height} exceeds the {max}x{max} limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// `[canvas]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CanvasConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) background: Option<Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: None,
        }
    }
}

/// `[colors]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ColorsConfig {
    /// Seed for reproducible item fills; random when absent.
    pub(crate) seed: Option<u64>,
    /// TTF/OTF font for raster labels.
    pub(crate) font: Option<PathBuf>,
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) canvas: CanvasConfig,
    pub(crate) layout: TreemapOptions,
    pub(crate) style: TreemapStyle,
    pub(crate) colors: ColorsConfig,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) font: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML document.
    pub(crate) fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, otherwise use defaults.
    pub(crate) fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Apply command-line overrides and validate.
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(width) = overrides.width {
            self.canvas.width = width;
        }
        if let Some(height) = overrides.height {
            self.canvas.height = height;
        }
        if overrides.seed.is_some() {
            self.colors.seed = overrides.seed;
        }
        if overrides.font.is_some() {
            self.colors.font = overrides.font;
        }
        if let Some(background) = self.canvas.background {
            self.style.background = background;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidSize {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        let max = RasterCanvas::MAX_DIMENSION;
        if self.canvas.width > max || self.canvas.height > max {
            return Err(ConfigError::TooLarge {
                width: self.canvas.width,
                height: self.canvas.height,
                max,
            });
        }
        Ok(())
    }
}
