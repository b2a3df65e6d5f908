//! Provider (backend) used for LLM inference and embeddings.

use crate::error_handler::ConfigError;

/// Which backend serves a given profile.
///
/// Adding more providers later (e.g. Anthropic, Mistral API) means extending
/// this enum and the matching service module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible REST API (`/v1/chat/completions`, `/v1/embeddings`).
    OpenAi,
}

impl LlmProvider {
    /// Parses the `LLM_PROVIDER` value, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" | "open-ai" | "chatgpt" => Ok(LlmProvider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!(LlmProvider::parse("ollama").unwrap(), LlmProvider::Ollama);
        assert_eq!(LlmProvider::parse("OpenAI").unwrap(), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::parse("chatgpt").unwrap(), LlmProvider::OpenAi);
        assert!(LlmProvider::parse("bedrock").is_err());
    }
}
