//! Public API types re-used by external crates (e.g. the HTTP API layer).

/// Final answer together with observability facts about how it was built.
#[derive(Clone, Debug)]
pub struct QaAnswer {
    /// Generated answer text.
    pub answer: String,
    /// True when the whole-corpus fallback supplied the context.
    pub used_fallback: bool,
    /// How many ranked passages the context assembler kept.
    pub passages_used: usize,
}
