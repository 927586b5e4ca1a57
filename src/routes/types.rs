use serde::Serialize;

/// Response for `GET /`
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: EndpointList,
}

/// Routes exposed by the proxy, as advertised by `GET /`
#[derive(Debug, Serialize)]
pub struct EndpointList {
    pub health: &'static str,
    pub sets: &'static str,
    pub set: &'static str,
    pub cards: &'static str,
    pub card: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
