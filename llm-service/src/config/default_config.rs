//! Default profile configs loaded strictly from environment variables.
//!
//! Two roles are defined:
//!
//! - **Completion** → the chat model that generates the final answer
//! - **Embedding**  → the model that turns text into vectors
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`     = `ollama` (default) or `openai`
//! - `LLM_MAX_TOKENS`   = optional completion cap (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (defaults to 0.0)
//!
//! OpenAI-specific:
//! - `OPENAI_URL`       = endpoint base (defaults to `https://api.openai.com`)
//! - `OPENAI_API_KEY`   = mandatory when the provider is `openai`
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//!
//! Models:
//! - `COMPLETION_MODEL` = chat model id (mandatory)
//! - `EMBEDDING_MODEL`  = embedding model id (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_f32, env_opt_u32, must_env},
};

/// Resolves the configured provider, defaulting to Ollama when unset.
fn provider_from_env() -> Result<LlmProvider, LlmError> {
    match std::env::var("LLM_PROVIDER") {
        Ok(v) if !v.trim().is_empty() => LlmProvider::parse(&v).map_err(LlmError::from),
        _ => Ok(LlmProvider::Ollama),
    }
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(LlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

fn endpoint_and_key(provider: LlmProvider) -> Result<(String, Option<String>), LlmError> {
    match provider {
        LlmProvider::Ollama => Ok((ollama_endpoint()?, None)),
        LlmProvider::OpenAi => {
            let endpoint = std::env::var("OPENAI_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "https://api.openai.com".to_string());
            let key = must_env("OPENAI_API_KEY")?;
            Ok((endpoint, Some(key)))
        }
    }
}

/// Constructs the **completion** profile from env.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic unless `LLM_TEMPERATURE` set)
/// - `timeout_secs = Some(60)`
pub fn config_completion() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_from_env()?;
    let (endpoint, api_key) = endpoint_and_key(provider)?;
    let model = must_env("COMPLETION_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.or(Some(0.0));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature,
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs the **embedding** profile from env.
///
/// # Defaults
/// - `temperature = None` (not applicable)
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_from_env()?;
    let (endpoint, api_key) = endpoint_and_key(provider)?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    })
}
