//! Typed error taxonomy for the answering pipeline.
//!
//! The split mirrors what callers need to decide: caller-input problems map
//! to 400, timeouts to 504, everything else to a generic 500. Persistence
//! failures never surface here; they are logged by the writer and swallowed.

use doc_store::StoreError;
use llm_service::LlmError;
use thiserror::Error;

/// Message returned when the query is missing or empty after trimming.
pub const MISSING_QUERY_MESSAGE: &str = "Missing query in request data";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller-input problem; the message is safe to echo back.
    #[error("{0}")]
    User(String),

    /// Embedding or completion provider failed.
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),

    /// Document-store query failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An external call exceeded its bound.
    #[error("{stage} timed out after {secs}s")]
    Timeout { stage: &'static str, secs: u64 },

    /// Anything else unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Builds the canonical empty-query rejection.
    pub fn missing_query() -> Self {
        PipelineError::User(MISSING_QUERY_MESSAGE.to_string())
    }
}
