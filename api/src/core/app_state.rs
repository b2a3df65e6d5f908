//! Shared state for all HTTP handlers.

use std::{error::Error, sync::Arc};

use answer_pipeline::{AnswerPipeline, PipelineConfig, PromptTemplate};
use doc_store::{DocStore, StoreConfig};
use llm_service::LlmClients;

/// Shared state: the fully wired answering pipeline.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
}

impl AppState {
    /// Wires provider clients, the document store, and pipeline knobs from
    /// environment variables. Collection bootstrap is best-effort: a store
    /// that is down at boot must not prevent the server from starting.
    pub async fn from_env() -> Result<Self, Box<dyn Error>> {
        let clients = Arc::new(LlmClients::from_env()?);
        let store = Arc::new(DocStore::new(StoreConfig::from_env())?);

        if let Err(err) = store.bootstrap().await {
            tracing::warn!(error = %err, "collection bootstrap failed; continuing");
        }

        let pipeline = AnswerPipeline::new(
            clients.clone(),
            clients,
            store,
            PipelineConfig::from_env(),
            PromptTemplate::from_env(),
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
        })
    }

    /// Builds state around an existing pipeline (used by tests to inject
    /// fakes).
    pub fn with_pipeline(pipeline: Arc<AnswerPipeline>) -> Self {
        Self { pipeline }
    }
}
