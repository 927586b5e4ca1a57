//! Shared utilities for integration tests.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use pokemon_tcg_proxy::origin::AllowedOrigins;
use pokemon_tcg_proxy::routes::create_router;
use pokemon_tcg_proxy::state::AppState;
use pokemon_tcg_proxy::upstream::Forwarder;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// A request as seen by the mock upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// In-process stand-in for the Pokemon TCG API.
///
/// Special paths:
/// - `/sets/missing` answers 404
/// - `/cards/slow` sleeps for ten seconds before answering
/// - `/cards/garbled` answers 200 with a non-JSON body
///
/// Everything else answers 200 with `{"data": ..., "path": <path>}`.
pub struct MockUpstream {
    pub addr: SocketAddr,
    log: RequestLog,
}

#[allow(dead_code)]
impl MockUpstream {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let log: RequestLog = Arc::default();

        let app = Router::new().fallback(handle).with_state(log.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, log }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("upstream received no request")
    }
}

async fn handle(State(log): State<RequestLog>, uri: Uri, headers: HeaderMap) -> Response {
    log.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
    });

    match uri.path() {
        "/sets/missing" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "Not Found", "code": 404 } })),
        )
            .into_response(),
        "/cards/slow" => {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({ "data": {} })).into_response()
        }
        "/cards/garbled" => (StatusCode::OK, "<html>definitely not json</html>").into_response(),
        path => Json(json!({
            "data": [{ "id": "base1-4", "name": "Charizard" }],
            "page": 1,
            "path": path,
        }))
        .into_response(),
    }
}

/// Client that ignores proxy environment variables so tests always hit localhost
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Proxy router pointed at `base_url`
pub fn proxy_app(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Router {
    let forwarder = Forwarder::with_client(
        direct_client(),
        base_url,
        api_key.map(str::to_string),
        timeout,
    )
    .unwrap();
    let state = AppState::new(forwarder, AllowedOrigins::new([ALLOWED_ORIGIN]));

    create_router(Arc::new(state))
}
