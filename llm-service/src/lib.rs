//! Shared LLM client layer with two active profiles: **completion** and
//! **embedding**.
//!
//! The crate wraps two provider backends (an OpenAI-compatible REST API and
//! local Ollama) behind one handle, [`LlmClients`]. Construct it once, wrap
//! it in `Arc`, and pass clones to dependents; underlying HTTP clients are
//! cached per config so repeated calls never rebuild connections.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod service_clients;
pub mod services;

pub use chat::{ChatMessage, ChatRole};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_clients::LlmClients;
