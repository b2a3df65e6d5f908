//! Best-effort persistence of answered exchanges.
//!
//! The answer has already been computed by the time this runs, so a write
//! failure must never fail the request: the task is detached and its
//! failure channel is a log line.

use std::sync::Arc;

use doc_store::{NewExchange, StoreError};
use tracing::{debug, warn};

use crate::clients::DocumentStore;

/// Writes one exchange synchronously. Used by the detached task and directly
/// by tests.
pub async fn record_exchange(
    store: &dyn DocumentStore,
    question: String,
    answer: String,
    embedding: Vec<f32>,
) -> Result<(), StoreError> {
    store
        .insert_exchange(NewExchange {
            question,
            answer,
            embedding,
        })
        .await
}

/// Dispatches the write as a detached task after the response is prepared.
/// Failure is downgraded to a warning.
pub fn spawn_record_exchange(
    store: Arc<dyn DocumentStore>,
    question: String,
    answer: String,
    embedding: Vec<f32>,
) {
    tokio::spawn(async move {
        match record_exchange(store.as_ref(), question, answer, embedding).await {
            Ok(()) => debug!("exchange recorded"),
            Err(err) => warn!(error = %err, "failed to record exchange; response unaffected"),
        }
    });
}
