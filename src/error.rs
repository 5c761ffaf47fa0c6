//! Errors for the loading surfaces. Layout operations themselves never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid node id {0:?}")]
    InvalidId(String),

    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),
}
