use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or writing trees.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
