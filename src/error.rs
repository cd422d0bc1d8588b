//! Error types for content retrieval.
//!
//! Library-level failures are typed with `thiserror` so callers can decide on a
//! fallback; commands and the binary wrap them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch a raw document from a [`ContentSource`](crate::content::ContentSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document does not exist at the source
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// The path would escape the content root (e.g. `../` or a separator in a post id)
    #[error("Invalid resource path: {path}")]
    InvalidPath { path: String },

    /// The remote server answered with a non-success status
    #[error("Request for {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local file read failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Failure to load the post catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The metadata document is not valid JSON of the expected shape
    #[error("Malformed post metadata: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl SourceError {
    /// Whether the error means "the resource is missing" rather than a transport failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::NotFound { .. } | SourceError::Status { status: 404, .. }
        )
    }
}
