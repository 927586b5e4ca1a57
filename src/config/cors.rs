use serde::Deserialize;

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the proxy from a browser. Matched exactly.
    pub allowed_origins: Vec<String>,
}
