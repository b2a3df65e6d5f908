//! Conversation-history retrieval and expansion into role-tagged turns.

use doc_store::{StoreError, StoredExchange};
use llm_service::ChatMessage;
use tracing::debug;

use crate::cfg::{HistoryOrder, PipelineConfig};
use crate::clients::DocumentStore;

/// Fetches the most relevant prior exchanges and expands them into
/// role-tagged turns ready for composition.
///
/// With no stored history, returns a single synthetic user turn carrying the
/// current query so downstream message-list construction stays uniform.
///
/// # Errors
/// Returns `StoreError` on query failure.
pub async fn fetch_relevant_history(
    store: &dyn DocumentStore,
    vector: &[f32],
    cfg: &PipelineConfig,
    current_query: &str,
) -> Result<Vec<ChatMessage>, StoreError> {
    let exchanges = store.match_history(vector, cfg.history_limit).await?;
    debug!(
        exchanges = exchanges.len(),
        order = ?cfg.history_order,
        "history retrieved"
    );
    Ok(expand_history(exchanges, cfg.history_order, current_query))
}

/// Expands stored exchanges into `[user, assistant]` turn pairs.
///
/// `Similarity` keeps the store's relevance order; `Recency` re-sorts by
/// recording time, oldest first, so the newest exchange ends up adjacent to
/// the current question. RFC3339 timestamps sort correctly as strings.
pub fn expand_history(
    mut exchanges: Vec<StoredExchange>,
    order: HistoryOrder,
    current_query: &str,
) -> Vec<ChatMessage> {
    if exchanges.is_empty() {
        return vec![ChatMessage::user(current_query)];
    }

    if order == HistoryOrder::Recency {
        exchanges.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }

    exchanges
        .into_iter()
        .flat_map(|x| [ChatMessage::user(x.question), ChatMessage::assistant(x.answer)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_service::ChatRole;

    fn exchange(q: &str, a: &str, score: f32, ts: &str) -> StoredExchange {
        StoredExchange {
            question: q.to_string(),
            answer: a.to_string(),
            score,
            created_at: ts.to_string(),
        }
    }

    #[test]
    fn empty_history_yields_synthetic_turn() {
        let turns = expand_history(vec![], HistoryOrder::Similarity, "what is due?");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[0].content, "what is due?");
    }

    #[test]
    fn exchanges_expand_to_role_pairs_in_store_order() {
        let turns = expand_history(
            vec![
                exchange("q1", "a1", 0.9, "2026-01-02T00:00:00Z"),
                exchange("q2", "a2", 0.8, "2026-01-01T00:00:00Z"),
            ],
            HistoryOrder::Similarity,
            "current",
        );
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[0].content, "q1");
        assert_eq!(turns[1].role, ChatRole::Assistant);
        assert_eq!(turns[1].content, "a1");
        assert_eq!(turns[2].content, "q2");
    }

    #[test]
    fn recency_order_sorts_oldest_first() {
        let turns = expand_history(
            vec![
                exchange("newest", "a", 0.9, "2026-03-01T00:00:00Z"),
                exchange("oldest", "a", 0.8, "2026-01-01T00:00:00Z"),
                exchange("middle", "a", 0.7, "2026-02-01T00:00:00Z"),
            ],
            HistoryOrder::Recency,
            "current",
        );
        assert_eq!(turns[0].content, "oldest");
        assert_eq!(turns[2].content, "middle");
        assert_eq!(turns[4].content, "newest");
    }
}
