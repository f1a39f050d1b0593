//! Data file errors.

use thiserror::Error;

/// Why a single data file could not be merged into the context.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top-level value must be a mapping, found {0}")]
    NotMapping(&'static str),
}
