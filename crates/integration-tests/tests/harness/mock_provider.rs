//! Mock media provider backend for integration tests
//!
//! Serves the upstream paths the gateway's provider clients hit: OpenAI
//! speech and images, ElevenLabs text-to-speech, and a Replicate-style
//! prediction job queue.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Mock backend that returns predictable media bodies
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    speech_count: AtomicU32,
    image_count: AtomicU32,
    submit_count: AtomicU32,
    poll_count: AtomicU32,
    /// Number of requests to fail with 500 before succeeding
    fail_count: AtomicU32,
    /// Media body returned on success
    body: Vec<u8>,
    /// Content type attached to successful speech bodies
    speech_content_type: &'static str,
    /// Polls a prediction needs before it reports "succeeded"
    polls_until_done: u32,
    /// Filled in once the listener is bound, for prediction output URLs
    base_url: std::sync::OnceLock<String>,
}

impl MockProvider {
    /// Start a mock that always succeeds with a plausibly-sized body
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, vec![0xAB; 4096], 1, "audio/mpeg").await
    }

    /// Start a mock that fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n, vec![0xAB; 4096], 1, "audio/mpeg").await
    }

    /// Start a mock whose bodies are below any sane plausibility threshold
    pub async fn start_tiny() -> anyhow::Result<Self> {
        Self::start_inner(0, vec![0xAB; 16], 1, "audio/mpeg").await
    }

    /// Start a mock with a custom success body
    pub async fn start_with_body(body: Vec<u8>) -> anyhow::Result<Self> {
        Self::start_inner(0, body, 1, "audio/mpeg").await
    }

    /// Start a mock whose predictions need `polls` status checks to finish
    pub async fn start_slow_jobs(polls: u32) -> anyhow::Result<Self> {
        Self::start_inner(0, vec![0xAB; 4096], polls, "audio/mpeg").await
    }

    /// Start a mock that answers 200 with a large HTML error page
    pub async fn start_html_page() -> anyhow::Result<Self> {
        let page = format!("<html><body>{}</body></html>", "service degraded ".repeat(512));
        Self::start_inner(0, page.into_bytes(), 1, "text/html; charset=utf-8").await
    }

    async fn start_inner(
        fail_count: u32,
        body: Vec<u8>,
        polls_until_done: u32,
        speech_content_type: &'static str,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            speech_count: AtomicU32::new(0),
            image_count: AtomicU32::new(0),
            submit_count: AtomicU32::new(0),
            poll_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            body,
            speech_content_type,
            polls_until_done,
            base_url: std::sync::OnceLock::new(),
        });

        let app = Router::new()
            .route("/audio/speech", routing::post(handle_speech))
            .route("/text-to-speech/{voice}", routing::post(handle_speech))
            .route("/images/generations", routing::post(handle_images))
            .route("/predictions", routing::post(handle_submit))
            .route("/predictions/{id}", routing::get(handle_poll))
            .route("/outputs/result", routing::get(handle_output))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        state
            .base_url
            .set(format!("http://{addr}"))
            .expect("base_url set once");

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::SeqCst)
    }

    pub fn image_count(&self) -> u32 {
        self.state.image_count.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> u32 {
        self.state.submit_count.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> u32 {
        self.state.poll_count.load(Ordering::SeqCst)
    }

    /// Expected success body, for byte-equality assertions
    pub fn body(&self) -> Vec<u8> {
        self.state.body.clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn take_failure(state: &MockState) -> bool {
    state
        .fail_count
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

async fn handle_speech(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.speech_count.fetch_add(1, Ordering::SeqCst);

    if take_failure(&state) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response();
    }

    ([(axum::http::header::CONTENT_TYPE, state.speech_content_type)], state.body.clone()).into_response()
}

async fn handle_images(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.image_count.fetch_add(1, Ordering::SeqCst);

    if take_failure(&state) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response();
    }

    Json(json!({
        "created": 1_700_000_000,
        "data": [{ "b64_json": BASE64.encode(&state.body) }]
    }))
    .into_response()
}

async fn handle_submit(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.submit_count.fetch_add(1, Ordering::SeqCst);

    if take_failure(&state) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response();
    }

    Json(json!({ "id": "job-1", "status": "starting" })).into_response()
}

async fn handle_poll(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    let polls = state.poll_count.fetch_add(1, Ordering::SeqCst) + 1;

    if polls >= state.polls_until_done {
        let base = state.base_url.get().expect("base_url set").clone();
        Json(json!({
            "id": "job-1",
            "status": "succeeded",
            "output": [format!("{base}/outputs/result")]
        }))
        .into_response()
    } else {
        Json(json!({ "id": "job-1", "status": "processing" })).into_response()
    }
}

async fn handle_output(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    ([(axum::http::header::CONTENT_TYPE, "image/png")], state.body.clone()).into_response()
}
