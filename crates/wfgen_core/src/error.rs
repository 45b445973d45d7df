//! Error types for the renderer.

use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a document tree.
///
/// A well-formed tree always renders; every variant here is a broken
/// tree invariant, reported with the dotted path of the offending mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Duplicate key `{key}` in mapping at {path}")]
    DuplicateKey { path: String, key: String },
}
