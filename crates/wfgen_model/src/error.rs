//! Error types for the workflow model.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while loading or writing workflows.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unsupported definition format for file: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid workflow definition in file {path}: {message}")]
    InvalidDefinition { path: PathBuf, message: String },

    #[error("Render error: {0}")]
    Render(#[from] wfgen_core::RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
