use crate::error::{AppError, AppResult};
use crate::upstream::Endpoint;
use axum::extract::{Path, RawQuery, State};
use axum::response::Json;
use serde_json::Value;
use std::sync::Arc;

use super::AppState;

/// Forward to the upstream and tag any failure with the route's label
async fn relay(
    state: &AppState,
    endpoint: Endpoint,
    query: Option<&str>,
    label: &'static str,
) -> AppResult<Json<Value>> {
    state
        .forwarder
        .forward(&endpoint, query)
        .await
        .map(Json)
        .map_err(|e| AppError::upstream(label, e))
}

/// List sets, passing the query string through untouched
pub async fn list_sets(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Value>> {
    relay(&state, Endpoint::Sets, query.as_deref(), "Failed to fetch sets").await
}

/// Fetch a single set. Any inbound query string is dropped.
pub async fn get_set(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    relay(&state, Endpoint::Set(id), None, "Failed to fetch set").await
}

/// Search cards, passing the query string through untouched
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Value>> {
    relay(&state, Endpoint::Cards, query.as_deref(), "Failed to fetch cards").await
}

/// Fetch a single card. Any inbound query string is dropped.
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    relay(&state, Endpoint::Card(id), None, "Failed to fetch card").await
}
