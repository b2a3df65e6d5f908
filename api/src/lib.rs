//! HTTP shell: routing, CORS, and server lifecycle.
//!
//! One answering endpoint (`GET /ask`) plus permissive CORS for browser
//! callers; everything of substance lives in `answer-pipeline`.

use std::{env, error::Error, sync::Arc};

pub mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::get,
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use crate::core::app_state::AppState;
use crate::routes::ask::ask_route::ask_question;

/// Builds the application router. Exposed separately from [`start`] so tests
/// can drive it with an injected state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", get(ask_question))
        .layer(cors_layer())
        .with_state(state)
}

/// Permissive cross-origin policy for browser callers. The allowed request
/// headers mirror what the web clients actually send.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// Boots state from the environment, binds `API_ADDRESS`, and serves until
/// Ctrl+C.
pub async fn start() -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let state = Arc::new(AppState::from_env().await?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    tracing::info!("listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
