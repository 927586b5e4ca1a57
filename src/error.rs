use crate::upstream::ForwardError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A forwarded call failed. `label` names the route that made it.
    #[error("{label}: {source}")]
    Upstream {
        label: &'static str,
        #[source]
        source: ForwardError,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(label: &'static str, source: ForwardError) -> Self {
        AppError::Upstream { label, source }
    }
}

/// Convert AppError to HTTP response.
///
/// Every failure is reported as a 500; the upstream status code is carried
/// in the message only.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error_label, message) = match &self {
            AppError::Upstream { label, source } => {
                tracing::error!(error = %label, message = %source, "Upstream request failed");
                (label.to_string(), source.to_string())
            }
            _ => {
                tracing::error!("Internal error: {}", self);
                (
                    "Internal server error".to_string(),
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": error_label,
            "message": message,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for AppResult
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_status_error_is_500() {
        let err = AppError::upstream(
            "Failed to fetch set",
            ForwardError::Status(StatusCode::NOT_FOUND),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to fetch set");
        assert!(body["message"].as_str().unwrap().contains("404 Not Found"));
    }

    #[tokio::test]
    async fn test_timeout_error_body() {
        let err = AppError::upstream(
            "Failed to fetch cards",
            ForwardError::Timeout(Duration::from_secs(30)),
        );
        let body = body_json(err.into_response()).await;

        assert_eq!(body["error"], "Failed to fetch cards");
        assert!(body["message"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = AppError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal error occurred");
    }
}
