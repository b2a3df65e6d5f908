//! Maps pipeline failures to HTTP responses.
//!
//! Caller-input problems echo their message back with 400; everything else
//! is logged server-side in full and answered with a generic body so
//! provider payloads and stack traces never leak to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use answer_pipeline::PipelineError;

/// Generic message returned for every non-caller fault.
pub const GENERIC_ERROR_MESSAGE: &str = "There was an error processing your request";

/// Error body shape: `{error, data?}`. `data` is reserved for user-facing
/// validation context and stays absent on internal faults.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Newtype so `PipelineError` can cross the axum `IntoResponse` boundary.
pub struct ApiFailure(pub PipelineError);

impl From<PipelineError> for ApiFailure {
    fn from(err: PipelineError) -> Self {
        ApiFailure(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self.0 {
            PipelineError::User(message) => {
                // Caller mistake, not a system fault.
                debug!(%message, "rejected request input");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: message,
                        data: None,
                    }),
                )
                    .into_response()
            }
            PipelineError::Timeout { stage, secs } => {
                error!(stage, secs, "external call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    Json(ErrorBody {
                        error: GENERIC_ERROR_MESSAGE.to_string(),
                        data: None,
                    }),
                )
                    .into_response()
            }
            err @ (PipelineError::Provider(_)
            | PipelineError::Store(_)
            | PipelineError::Internal(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: GENERIC_ERROR_MESSAGE.to_string(),
                        data: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
