use crate::origin::AllowedOrigins;
use crate::upstream::Forwarder;

/// Application state shared across all HTTP handlers.
///
/// Built once at startup, wrapped in `Arc` and handed to the router. Nothing
/// in here changes after construction.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the upstream Pokemon TCG API
    pub forwarder: Forwarder,

    /// Origins permitted to call the proxy from a browser
    pub allowed_origins: AllowedOrigins,
}

impl AppState {
    pub fn new(forwarder: Forwarder, allowed_origins: AllowedOrigins) -> Self {
        Self {
            forwarder,
            allowed_origins,
        }
    }
}
