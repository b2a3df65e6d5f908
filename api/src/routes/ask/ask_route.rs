//! GET /ask — answers a question with retrieval-augmented context.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use answer_pipeline::QaAnswer;

use crate::{core::app_state::AppState, error_handler::ApiFailure, routes::ask::ask_request::AskParams};

/// Handler: GET /ask
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8000/ask?query=What%20is%20due%20next%20week%3F&name=the%20syllabus'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Response, ApiFailure> {
    let query = params.query.unwrap_or_default();

    let QaAnswer {
        answer,
        used_fallback,
        passages_used,
    } = state
        .pipeline
        .answer(&query, params.name.as_deref())
        .await
        .map_err(ApiFailure)?;

    info!(used_fallback, passages_used, "answer served");

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        answer,
    )
        .into_response())
}
