//! Market data input files.
//!
//! JSON or YAML in the web client's wire shape, picked by file extension.
//! A path of `-` reads JSON from stdin.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use visualcoin::Group;

/// Errors reading market data.
#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("unsupported input format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// Input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guess the format from the file extension.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        if path == Path::new("-") {
            return Some(Self::Json);
        }
        match path
            .extension()?
            .to_str()?
            .to_ascii_lowercase()
            .as_str()
        {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse groups from text.
pub(crate) fn parse_groups(text: &str, format: Format, path: &Path) -> Result<Vec<Group>, InputError> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Yaml => serde_yaml_ng::from_str(text).map_err(|source| InputError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and parse a data file.
pub(crate) fn load_groups(path: &Path) -> Result<Vec<Group>, InputError> {
    let format =
        Format::from_path(path).ok_or_else(|| InputError::UnsupportedFormat(path.to_path_buf()))?;
    let read_err = |source: std::io::Error| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(read_err)?;
        text
    } else {
        std::fs::read_to_string(path).map_err(read_err)?
    };
    parse_groups(&text, format, path)
}
