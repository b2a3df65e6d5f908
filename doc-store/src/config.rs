//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Configuration for the document and history collections.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Collection holding the document corpus.
    pub passages_collection: String,
    /// Collection holding recorded Q/A exchanges.
    pub history_collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Expected embedding dimensionality; collections are bootstrapped with
    /// it when known.
    pub embedding_dim: Option<usize>,
}

impl StoreConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            qdrant_url: env("QDRANT_URL", "http://localhost:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            passages_collection: env("PASSAGES_COLLECTION", "docs_passages"),
            history_collection: env("HISTORY_COLLECTION", "docs_history"),
            distance: DistanceKind::Cosine,
            embedding_dim: std::env::var("EMBEDDING_DIM")
                .ok()
                .and_then(|s| s.parse::<usize>().ok()),
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.passages_collection.trim().is_empty() {
            return Err(StoreError::Config("passages_collection is empty".into()));
        }
        if self.history_collection.trim().is_empty() {
            return Err(StoreError::Config("history_collection is empty".into()));
        }
        if self.passages_collection == self.history_collection {
            return Err(StoreError::Config(
                "passages and history collections must differ".into(),
            ));
        }
        Ok(())
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StoreConfig {
        StoreConfig {
            qdrant_url: "http://localhost:6334".into(),
            qdrant_api_key: None,
            passages_collection: "docs_passages".into(),
            history_collection: "docs_history".into(),
            distance: DistanceKind::Cosine,
            embedding_dim: Some(1536),
        }
    }

    #[test]
    fn validate_accepts_sane_config() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_colliding_collections() {
        let mut cfg = base();
        cfg.history_collection = cfg.passages_collection.clone();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_url() {
        let mut cfg = base();
        cfg.qdrant_url = "  ".into();
        assert!(cfg.validate().is_err());
    }
}
