//! Shared handle over the **completion** and **embedding** profiles.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::service_clients::LlmClients;
//! use llm_service::{ChatMessage, LlmModelConfig, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmError> {
//!     let completion = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "qwen3:14b".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         max_tokens: Some(512),
//!         temperature: Some(0.0),
//!         top_p: None,
//!         timeout_secs: Some(60),
//!     };
//!     let embedding = LlmModelConfig { model: "nomic-embed-text".into(), ..completion.clone() };
//!
//!     let svc = Arc::new(LlmClients::new(completion, embedding));
//!
//!     let answer = svc.complete(&[ChatMessage::user("2+2=")]).await?;
//!     let vector = svc.embed("Ferris").await?;
//!     println!("{answer} / dim={}", vector.len());
//!     Ok(())
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    chat::ChatMessage,
    config::{
        default_config::{config_completion, config_embedding},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::LlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Shared service managing the **completion** and **embedding** profiles.
///
/// Internally caches Ollama/OpenAI clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmClients {
    completion: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
}

impl LlmClients {
    /// Creates a new handle from two complete profiles.
    pub fn new(completion: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            completion,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a handle from environment variables
    /// (see [`crate::config::default_config`]).
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::new(config_completion()?, config_embedding()?))
    }

    /// Submits the full message sequence to the **completion** profile and
    /// returns the generated text. Streaming is disabled in both backends;
    /// the whole response is awaited.
    ///
    /// # Errors
    /// Returns [`LlmError`] on transport failures, non-success statuses,
    /// malformed payloads, or an empty choice list.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        match self.completion.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.completion).await?;
                cli.chat(messages).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.completion).await?;
                cli.chat(messages).await
            }
        }
    }

    /// Computes an embedding vector using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the provider call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        match self.embedding.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.embedding).await?;
                cli.embeddings(input).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Returns references to the current profiles `(completion, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.completion, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key identifying a unique client config.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn client_key_distinguishes_models() {
        let a = ClientKey::from(&cfg("nomic-embed-text"));
        let b = ClientKey::from(&cfg("nomic-embed-text"));
        let c = ClientKey::from(&cfg("qwen3:14b"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn client_cache_is_reused() {
        let svc = LlmClients::new(cfg("qwen3:14b"), cfg("nomic-embed-text"));
        let first = svc.get_or_init_ollama(&svc.embedding).await.unwrap();
        let second = svc.get_or_init_ollama(&svc.embedding).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(svc.ollama.read().await.len(), 1);
    }
}
