//! Business directory — the static reference data sent as prompt context.
//!
//! A default directory is bundled with the crate. Alternative directories
//! can be loaded from JSON or YAML files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_DIRECTORY: &str = include_str!("../data/businesses.json");

/// A local business listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
}

/// Errors that can occur while loading a directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON directory: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML directory: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported directory format: {0}")]
    UnsupportedFormat(String),
}

/// Returns the directory bundled with the crate.
pub fn bundled_directory() -> Result<Vec<Business>, DirectoryError> {
    Ok(serde_json::from_str(BUNDLED_DIRECTORY)?)
}

/// Load a directory from a `.json`, `.yaml` or `.yml` file.
pub fn load_directory(path: &Path) -> Result<Vec<Business>, DirectoryError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(&raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&raw)?),
        other => Err(DirectoryError::UnsupportedFormat(other.to_string())),
    }
}
