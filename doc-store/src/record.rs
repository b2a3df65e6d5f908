//! Core data models used by the store.

use serde::{Deserialize, Serialize};

/// A corpus passage returned by similarity search, in descending-score
/// order as produced by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassageMatch {
    /// Passage text.
    pub content: String,
    /// Similarity score against the query vector.
    pub score: f32,
}

/// A previously recorded Q/A exchange retrieved from the history collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredExchange {
    /// The question as the user asked it.
    pub question: String,
    /// The answer the model produced.
    pub answer: String,
    /// Similarity score against the current query vector.
    pub score: f32,
    /// RFC3339 UTC timestamp of when the exchange was recorded.
    pub created_at: String,
}

/// A new exchange to append to the history collection. Exchanges are
/// immutable once written; corrections are new exchanges.
#[derive(Clone, Debug)]
pub struct NewExchange {
    pub question: String,
    pub answer: String,
    /// Query embedding; the point vector for future history lookups.
    pub embedding: Vec<f32>,
}
