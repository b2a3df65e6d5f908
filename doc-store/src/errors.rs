//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for doc-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// A stored payload was missing a required field or had the wrong type.
    #[error("payload decode error: {0}")]
    Decode(String),

    /// Generic error from an anyhow chain.
    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}
