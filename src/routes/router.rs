use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::health;
use super::tcg_handlers;
use super::AppState;
use crate::middleware::{origin_gate_middleware, request_id_middleware};

/// Create application router
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    let cors = state.allowed_origins.cors_layer();

    let api_routes = axum::Router::new()
        .route("/api/sets", get(tcg_handlers::list_sets))
        .route("/api/sets/{id}", get(tcg_handlers::get_set))
        .route("/api/cards", get(tcg_handlers::list_cards))
        .route("/api/cards/{id}", get(tcg_handlers::get_card));

    let health_routes = axum::Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check));

    // Outermost first: request id, trace, origin gate, CORS
    api_routes
        .merge(health_routes)
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            origin_gate_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
