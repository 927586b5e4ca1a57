//! Browser origin allow-list.
//!
//! The same list drives two things: the origin gate, which rejects requests
//! from unknown origins before routing, and the CORS headers returned to
//! browsers that are allowed through.

use axum::http::{header, HeaderValue, Method};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Static set of origins, fixed at startup
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins {
    origins: Arc<HashSet<String>>,
}

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Decide whether a request carrying `origin` may proceed.
    ///
    /// No origin means a same-origin or non-browser caller and is always
    /// allowed. A present origin must match an entry exactly.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.origins.contains(origin),
        }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// CORS layer advertising this allow-list
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .origins
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_origin_always_allowed() {
        assert!(AllowedOrigins::default().permits(None));
        assert!(AllowedOrigins::new(["http://localhost:5173"]).permits(None));
    }

    #[test]
    fn test_exact_match_allowed() {
        let origins = AllowedOrigins::new(["http://localhost:3000", "http://localhost:5173"]);
        assert!(origins.permits(Some("http://localhost:3000")));
        assert!(origins.permits(Some("http://localhost:5173")));
    }

    #[test]
    fn test_near_misses_denied() {
        let origins = AllowedOrigins::new(["http://localhost:5173"]);

        assert!(!origins.permits(Some("http://localhost:5173/")));
        assert!(!origins.permits(Some("https://localhost:5173")));
        assert!(!origins.permits(Some("HTTP://LOCALHOST:5173")));
        assert!(!origins.permits(Some("http://localhost:51730")));
        assert!(!origins.permits(Some("null")));
        assert!(!origins.permits(Some("")));
    }

    #[test]
    fn test_empty_list_denies_any_origin() {
        let origins = AllowedOrigins::default();
        assert!(origins.is_empty());
        assert!(!origins.permits(Some("http://localhost:3000")));
    }
}
