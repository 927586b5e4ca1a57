use crate::routes::types::{EndpointList, HealthCheckResponse, ServiceInfoResponse};
use axum::Json;

pub const SERVICE_NAME: &str = "Pokemon TCG API Proxy";

/// Service identity and the routes it serves
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointList {
            health: "/health",
            sets: "/api/sets",
            set: "/api/sets/{id}",
            cards: "/api/cards",
            card: "/api/cards/{id}",
        },
    })
}

/// Liveness probe. Does not touch the upstream.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy",
        timestamp: chrono::Utc::now(),
    })
}
