//! Giglog Error Types
//!
//! Errors only arise at the edges (config files, dataset exports). Matching and
//! transcript parsing never fail; they report absence instead.

use thiserror::Error;

/// Central error type for Giglog
#[derive(Error, Debug)]
pub enum GigError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Reference list error: {0}")]
    ReferenceLists(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Giglog operations
pub type GigResult<T> = Result<T, GigError>;
