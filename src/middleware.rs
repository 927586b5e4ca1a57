use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

/// Request ID wrapper for use in request extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Request ID middleware - adds a unique ID to each request
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    // Reuse the caller's ID when it sent one
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| RequestId(s.to_string()))
        .unwrap_or_default();

    tracing::info!(
        request_id = %request_id.as_str(),
        method = %req.method(),
        path = %req.uri().path(),
        "Incoming request"
    );

    let header_value = HeaderValue::from_str(request_id.as_str()).ok();
    req.extensions_mut().insert(request_id);

    let mut response = next.run(req).await;

    if let Some(header_value) = header_value {
        response.headers_mut().insert("x-request-id", header_value);
    }

    response
}

/// Origin gate - rejects browser requests from origins outside the allow-list
/// before they reach any handler
pub async fn origin_gate_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req.headers().get(header::ORIGIN);

    // A header that is not visible ASCII can never match an entry
    let allowed = match origin {
        None => true,
        Some(value) => value
            .to_str()
            .map(|o| state.allowed_origins.permits(Some(o)))
            .unwrap_or(false),
    };

    if !allowed {
        tracing::warn!(
            origin = ?origin,
            path = %req.uri().path(),
            "Rejected request from disallowed origin"
        );
        return (StatusCode::FORBIDDEN, "Not allowed by CORS").into_response();
    }

    next.run(req).await
}
