//! Runtime configuration loaded from environment variables.

use std::time::Duration;

/// Ordering strategy for retrieved conversation history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryOrder {
    /// Keep the store's relevance order (most similar first).
    Similarity,
    /// Re-sort by recording time, oldest first, so the latest exchange sits
    /// immediately before the current question.
    Recency,
}

impl HistoryOrder {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "recency" => HistoryOrder::Recency,
            _ => HistoryOrder::Similarity,
        }
    }
}

/// Config bag for the pipeline. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Minimum similarity score a passage must clear.
    pub match_threshold: f32,
    /// Maximum number of passages requested from the store.
    pub match_count: u64,
    /// Passages shorter than this many bytes are dropped.
    pub min_content_length: usize,
    /// Character budget for the assembled context block.
    pub context_budget_chars: usize,
    /// Maximum number of past exchanges merged into the prompt.
    pub history_limit: u64,
    /// How retrieved history is ordered before composition.
    pub history_order: HistoryOrder,
    /// Per-call bound on every external call.
    pub call_timeout: Duration,
    /// Topic label used in the system prompt when the request names none.
    pub topic_label: String,
}

impl PipelineConfig {
    /// Build from environment variables with sensible defaults.
    ///
    /// Knobs: `MATCH_THRESHOLD`, `MATCH_COUNT`, `MIN_CONTENT_LENGTH`,
    /// `CONTEXT_BUDGET_CHARS`, `HISTORY_LIMIT`, `HISTORY_ORDER`
    /// (`similarity` | `recency`), `PROVIDER_TIMEOUT_SECS`, `TOPIC_LABEL`.
    pub fn from_env() -> Self {
        Self {
            match_threshold: parse("MATCH_THRESHOLD", 0.78f32),
            match_count: parse("MATCH_COUNT", 10u64),
            min_content_length: parse("MIN_CONTENT_LENGTH", 50usize),
            context_budget_chars: parse("CONTEXT_BUDGET_CHARS", 6000usize),
            history_limit: parse("HISTORY_LIMIT", 5u64),
            history_order: HistoryOrder::parse(&env("HISTORY_ORDER", "similarity")),
            call_timeout: Duration::from_secs(parse("PROVIDER_TIMEOUT_SECS", 30u64)),
            topic_label: env("TOPIC_LABEL", "the documentation"),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.78,
            match_count: 10,
            min_content_length: 50,
            context_budget_chars: 6000,
            history_limit: 5,
            history_order: HistoryOrder::Similarity,
            call_timeout: Duration::from_secs(30),
            topic_label: "the documentation".to_string(),
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_order_parses_leniently() {
        assert_eq!(HistoryOrder::parse("recency"), HistoryOrder::Recency);
        assert_eq!(HistoryOrder::parse("Recency "), HistoryOrder::Recency);
        assert_eq!(HistoryOrder::parse("similarity"), HistoryOrder::Similarity);
        assert_eq!(HistoryOrder::parse("unknown"), HistoryOrder::Similarity);
    }

    #[test]
    fn defaults_match_observed_tuning() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.match_threshold, 0.78);
        assert_eq!(cfg.match_count, 10);
        assert_eq!(cfg.min_content_length, 50);
    }
}
