//! Per-profile model configuration.

use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM profile (completion or embedding).
///
/// Covers both general and provider-specific parameters; providers ignore
/// fields they have no use for (e.g. Ollama ignores `api_key`).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The provider/backend serving this profile.
    pub provider: LlmProvider,

    /// Model identifier string (e.g. `"gpt-4o-mini"`, `"nomic-embed-text"`).
    pub model: String,

    /// Inference endpoint base URL.
    pub endpoint: String,

    /// Optional API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate (completion only).
    pub max_tokens: Option<u32>,

    /// Sampling temperature; `Some(0.0)` pins generation to deterministic.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
