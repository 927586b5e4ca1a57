use serde::Deserialize;

/// Upstream Pokemon TCG API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every route path is appended to (e.g., "https://api.pokemontcg.io/v2")
    pub base_url: String,

    /// Key sent as `X-Api-Key`. Requests go out unauthenticated when unset.
    pub api_key: Option<String>,

    /// Deadline for a single upstream exchange
    pub timeout_seconds: u64,
}
