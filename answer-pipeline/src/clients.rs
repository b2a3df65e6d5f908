//! Client seams the pipeline talks through.
//!
//! The handler never holds concrete provider/store types; it holds these
//! traits, so tests substitute fakes and production wires in [`LlmClients`]
//! and [`DocStore`].

use async_trait::async_trait;

use doc_store::{DocStore, NewExchange, PassageMatch, StoreError, StoredExchange};
use llm_service::{ChatMessage, LlmClients, LlmError};

/// Turns text into a fixed-dimension vector.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

/// Submits a composed message sequence and returns generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// The document store capabilities the pipeline consumes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Similarity search over the corpus with threshold/count/min-length.
    async fn match_passages(
        &self,
        vector: &[f32],
        threshold: f32,
        count: u64,
        min_content_length: usize,
    ) -> Result<Vec<PassageMatch>, StoreError>;

    /// Whole-corpus concatenation, the fallback when nothing matches.
    async fn combine_all_content(&self) -> Result<String, StoreError>;

    /// Similarity search over recorded exchanges.
    async fn match_history(
        &self,
        vector: &[f32],
        limit: u64,
    ) -> Result<Vec<StoredExchange>, StoreError>;

    /// Appends one recorded exchange.
    async fn insert_exchange(&self, exchange: NewExchange) -> Result<(), StoreError>;
}

#[async_trait]
impl EmbeddingClient for LlmClients {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        LlmClients::embed(self, text).await
    }
}

#[async_trait]
impl CompletionClient for LlmClients {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        LlmClients::complete(self, messages).await
    }
}

#[async_trait]
impl DocumentStore for DocStore {
    async fn match_passages(
        &self,
        vector: &[f32],
        threshold: f32,
        count: u64,
        min_content_length: usize,
    ) -> Result<Vec<PassageMatch>, StoreError> {
        DocStore::match_passages(self, vector, threshold, count, min_content_length).await
    }

    async fn combine_all_content(&self) -> Result<String, StoreError> {
        DocStore::combine_all_content(self).await
    }

    async fn match_history(
        &self,
        vector: &[f32],
        limit: u64,
    ) -> Result<Vec<StoredExchange>, StoreError> {
        DocStore::match_history(self, vector, limit).await
    }

    async fn insert_exchange(&self, exchange: NewExchange) -> Result<(), StoreError> {
        DocStore::insert_exchange(self, exchange).await
    }
}
