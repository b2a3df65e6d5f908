//! End-to-end tests for `GET /ask`, driving the real router with fake
//! provider/store clients injected through the pipeline seams.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use answer_pipeline::{
    AnswerPipeline, CompletionClient, DocumentStore, EmbeddingClient, PipelineConfig,
    PromptTemplate,
};
use api::core::app_state::AppState;
use doc_store::{NewExchange, PassageMatch, StoreError, StoredExchange};
use llm_service::error_handler::{ProviderError, ProviderErrorKind};
use llm_service::{ChatMessage, LlmError, LlmProvider};

struct FakeEmbedder {
    fail: bool,
}

#[async_trait]
impl EmbeddingClient for FakeEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        if self.fail {
            return Err(ProviderError::new(
                LlmProvider::OpenAi,
                ProviderErrorKind::Decode("secret provider diagnostics".into()),
            )
            .into());
        }
        Ok(vec![0.1, 0.2, 0.3])
    }
}

struct FakeCompleter {
    reply: String,
}

#[async_trait]
impl CompletionClient for FakeCompleter {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        Ok(self.reply.clone())
    }
}

#[derive(Default)]
struct FakeStore {
    passages: Vec<PassageMatch>,
    combined: String,
    combine_calls: AtomicUsize,
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn match_passages(
        &self,
        _vector: &[f32],
        _threshold: f32,
        _count: u64,
        _min_content_length: usize,
    ) -> Result<Vec<PassageMatch>, StoreError> {
        Ok(self.passages.clone())
    }

    async fn combine_all_content(&self) -> Result<String, StoreError> {
        self.combine_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.combined.clone())
    }

    async fn match_history(
        &self,
        _vector: &[f32],
        _limit: u64,
    ) -> Result<Vec<StoredExchange>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert_exchange(&self, _exchange: NewExchange) -> Result<(), StoreError> {
        Ok(())
    }
}

fn passage(content: &str) -> PassageMatch {
    PassageMatch {
        content: content.to_string(),
        score: 0.88,
    }
}

fn app_with(store: Arc<FakeStore>, embed_fail: bool) -> Router {
    let pipeline = AnswerPipeline::new(
        Arc::new(FakeEmbedder { fail: embed_fail }),
        Arc::new(FakeCompleter {
            reply: "Generated answer.".to_string(),
        }),
        store,
        PipelineConfig::default(),
        PromptTemplate::default(),
    );
    api::router(Arc::new(AppState::with_pipeline(Arc::new(pipeline))))
}

fn get_ask(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .expect("request build")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn answers_with_plain_text_and_cors_headers() {
    let store = Arc::new(FakeStore {
        passages: vec![
            passage("The project proposal is due on Friday."),
            passage("Weekly standups happen every Monday morning."),
        ],
        ..Default::default()
    });
    let app = app_with(store, false);

    let resp = app
        .oneshot(get_ask("/ask?query=What%20is%20due%20next%20week%3F"))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("text/plain"))
            .unwrap_or(false)
    );
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body = body_string(resp).await;
    assert!(!body.is_empty());
    assert_eq!(body, "Generated answer.");
}

#[tokio::test]
async fn missing_query_maps_to_400_with_exact_body() {
    let app = app_with(Arc::new(FakeStore::default()), false);

    for uri in ["/ask", "/ask?query=", "/ask?query=%20%20"] {
        let resp = app.clone().oneshot(get_ask(uri)).await.expect("request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri {uri}");

        let body: Value = serde_json::from_str(&body_string(resp).await).expect("json body");
        assert_eq!(body, serde_json::json!({"error": "Missing query in request data"}));
    }
}

#[tokio::test]
async fn provider_failure_maps_to_generic_500_without_leaking_detail() {
    let app = app_with(Arc::new(FakeStore::default()), true);

    let resp = app
        .oneshot(get_ask("/ask?query=anything"))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp).await;
    let json: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(
        json,
        serde_json::json!({"error": "There was an error processing your request"})
    );
    assert!(!body.contains("secret provider diagnostics"));
}

#[tokio::test]
async fn empty_match_takes_fallback_and_still_answers() {
    let store = Arc::new(FakeStore {
        combined: "Entire corpus as one blob.".to_string(),
        ..Default::default()
    });
    let app = app_with(store.clone(), false);

    let resp = app
        .oneshot(get_ask("/ask?query=something%20unmatched"))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(store.combine_calls.load(Ordering::SeqCst), 1);
    assert_eq!(body_string(resp).await, "Generated answer.");
}

#[tokio::test]
async fn preflight_options_gets_permissive_cors_response() {
    let app = app_with(Arc::new(FakeStore::default()), false);

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/ask")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .expect("request build");

    let resp = app.oneshot(req).await.expect("request");

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn topic_label_is_accepted_alongside_query() {
    let store = Arc::new(FakeStore {
        passages: vec![passage("Grading rubric: participation counts for 10%.")],
        ..Default::default()
    });
    let app = app_with(store, false);

    let resp = app
        .oneshot(get_ask(
            "/ask?query=How%20is%20grading%20weighted%3F&name=the%20course%20syllabus",
        ))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
}
