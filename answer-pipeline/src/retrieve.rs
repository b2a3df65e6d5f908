//! Passage retrieval with an explicit whole-corpus fallback.

use doc_store::{PassageMatch, StoreError};
use tracing::{debug, warn};

use crate::cfg::PipelineConfig;
use crate::clients::DocumentStore;

/// What retrieval produced. The fallback path is a distinct variant so it
/// stays observable all the way to the response instead of blending in with
/// a normal small-context answer.
#[derive(Clone, Debug)]
pub enum RetrievedContext {
    /// Ranked passages that cleared the similarity threshold.
    Ranked(Vec<PassageMatch>),
    /// The whole corpus, used because nothing cleared the threshold.
    Fallback(String),
}

impl RetrievedContext {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RetrievedContext::Fallback(_))
    }
}

/// Runs similarity search; on an empty result, falls back to the
/// whole-corpus concatenation so the prompt always has some context.
///
/// # Errors
/// Returns `StoreError` if either store call fails. No retries here.
pub async fn retrieve_passages(
    store: &dyn DocumentStore,
    vector: &[f32],
    cfg: &PipelineConfig,
) -> Result<RetrievedContext, StoreError> {
    let hits = store
        .match_passages(
            vector,
            cfg.match_threshold,
            cfg.match_count,
            cfg.min_content_length,
        )
        .await?;

    if hits.is_empty() {
        warn!(
            threshold = cfg.match_threshold,
            "no passage cleared the similarity threshold; falling back to whole corpus"
        );
        let all = store.combine_all_content().await?;
        debug!(chars = all.len(), "fallback corpus loaded");
        return Ok(RetrievedContext::Fallback(all));
    }

    debug!(hits = hits.len(), "ranked passages retrieved");
    Ok(RetrievedContext::Ranked(hits))
}
