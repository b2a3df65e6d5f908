//! Retrieval-augmented answering pipeline.
//!
//! Public API: [`AnswerPipeline::answer`]. It validates the query, embeds it
//! (newlines normalized), retrieves ranked passages and relevant history
//! concurrently, assembles context under a character budget (or takes the
//! whole-corpus fallback verbatim), composes the prompt, calls the
//! completion provider, and records the exchange as a detached best-effort
//! write.
//!
//! All collaborators are injected behind traits ([`EmbeddingClient`],
//! [`CompletionClient`], [`DocumentStore`]), so the pipeline is testable
//! with fakes and carries no process-wide state.

pub mod api_types;
pub mod cfg;
pub mod clients;
pub mod context;
pub mod error;
pub mod history;
pub mod persist;
pub mod prompt;
pub mod retrieve;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

pub use api_types::QaAnswer;
pub use cfg::{HistoryOrder, PipelineConfig};
pub use clients::{CompletionClient, DocumentStore, EmbeddingClient};
pub use error::{MISSING_QUERY_MESSAGE, PipelineError};
pub use prompt::PromptTemplate;
pub use retrieve::RetrievedContext;

/// The assembled pipeline: injected clients plus tuning knobs.
///
/// Construct once at startup, wrap in `Arc`, and share across requests;
/// per-request state lives entirely on the stack of [`AnswerPipeline::answer`].
pub struct AnswerPipeline {
    embedder: Arc<dyn EmbeddingClient>,
    completer: Arc<dyn CompletionClient>,
    store: Arc<dyn DocumentStore>,
    cfg: PipelineConfig,
    template: PromptTemplate,
}

impl AnswerPipeline {
    /// Wires the pipeline from its collaborators.
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        completer: Arc<dyn CompletionClient>,
        store: Arc<dyn DocumentStore>,
        cfg: PipelineConfig,
        template: PromptTemplate,
    ) -> Self {
        Self {
            embedder,
            completer,
            store,
            cfg,
            template,
        }
    }

    /// Answers a free-text question with retrieval-augmented context.
    ///
    /// `topic` is an optional label used only for prompt phrasing; it falls
    /// back to the configured default.
    ///
    /// # Errors
    /// - [`PipelineError::User`] for an empty query (before any external call)
    /// - [`PipelineError::Provider`] / [`PipelineError::Store`] when a
    ///   collaborator fails
    /// - [`PipelineError::Timeout`] when an external call exceeds its bound
    pub async fn answer(
        &self,
        query: &str,
        topic: Option<&str>,
    ) -> Result<QaAnswer, PipelineError> {
        // Validation fails fast, before any external call.
        let sanitized = query.trim();
        if sanitized.is_empty() {
            return Err(PipelineError::missing_query());
        }

        let embed_input = normalize_for_embedding(sanitized);
        let vector = self.embed_with_retry(&embed_input).await?;

        // Passage and history retrieval both depend only on the embedding,
        // so they run concurrently.
        let (retrieved, history) = tokio::try_join!(
            with_timeout(
                "passage retrieval",
                self.cfg.call_timeout,
                retrieve::retrieve_passages(self.store.as_ref(), &vector, &self.cfg),
            ),
            with_timeout(
                "history retrieval",
                self.cfg.call_timeout,
                history::fetch_relevant_history(
                    self.store.as_ref(),
                    &vector,
                    &self.cfg,
                    sanitized
                ),
            ),
        )?;

        let used_fallback = retrieved.is_fallback();
        let ctx = match retrieved {
            RetrievedContext::Ranked(passages) => {
                context::assemble(&passages, self.cfg.context_budget_chars)
            }
            RetrievedContext::Fallback(all_content) => context::from_fallback(all_content),
        };

        let topic = topic
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.cfg.topic_label);
        let today = Utc::now().date_naive();
        let messages = prompt::compose(&self.template, &ctx.text, &history, sanitized, topic, today);

        let answer = self.complete_with_retry(&messages).await?;

        // Fire-and-forget: the response must not wait on, or fail with,
        // the history write.
        persist::spawn_record_exchange(
            self.store.clone(),
            sanitized.to_string(),
            answer.clone(),
            vector,
        );

        info!(
            used_fallback,
            passages_used = ctx.passages_used,
            context_chars = ctx.used_chars,
            "answer generated"
        );

        Ok(QaAnswer {
            answer,
            used_fallback,
            passages_used: ctx.passages_used,
        })
    }

    async fn embed_with_retry(&self, input: &str) -> Result<Vec<f32>, PipelineError> {
        let bound = self.cfg.call_timeout;
        match with_timeout("query embedding", bound, self.embedder.embed(input)).await {
            Err(err) if is_transient(&err) => {
                warn!(error = %err, "transient embedding failure; retrying once");
                tokio::time::sleep(retry_jitter()).await;
                with_timeout("query embedding", bound, self.embedder.embed(input)).await
            }
            other => other,
        }
    }

    async fn complete_with_retry(
        &self,
        messages: &[llm_service::ChatMessage],
    ) -> Result<String, PipelineError> {
        let bound = self.cfg.call_timeout;
        match with_timeout("completion", bound, self.completer.complete(messages)).await {
            Err(err) if is_transient(&err) => {
                warn!(error = %err, "transient completion failure; retrying once");
                tokio::time::sleep(retry_jitter()).await;
                with_timeout("completion", bound, self.completer.complete(messages)).await
            }
            other => other,
        }
    }
}

/// Embedding models are sensitive to literal line breaks; submit the query
/// with every newline replaced by a single space.
pub fn normalize_for_embedding(text: &str) -> String {
    text.replace('\n', " ")
}

/// Bounds an external call and maps elapse to [`PipelineError::Timeout`].
async fn with_timeout<T, E, F>(
    stage: &'static str,
    bound: Duration,
    fut: F,
) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, E>>,
    PipelineError: From<E>,
{
    match tokio::time::timeout(bound, fut).await {
        Ok(res) => res.map_err(PipelineError::from),
        Err(_) => Err(PipelineError::Timeout {
            stage,
            secs: bound.as_secs(),
        }),
    }
}

/// Only transport-level provider failures get the single retry; status,
/// decode, store, and timeout failures do not.
fn is_transient(err: &PipelineError) -> bool {
    matches!(err, PipelineError::Provider(inner) if inner.is_transient())
}

fn retry_jitter() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(50..=150))
}
