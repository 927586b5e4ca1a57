//! Forwarding of proxy routes to the Pokemon TCG API.
//!
//! Each inbound request produces exactly one outbound GET. The whole exchange
//! (send, status check, body read) runs under a single deadline; when it
//! elapses the exchange future is dropped, which aborts the in-flight request.

use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the upstream API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Failure of a single forwarded call
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Upstream request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Displays as e.g. "API request failed: 404 Not Found"
    #[error("API request failed: {0}")]
    Status(StatusCode),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cannot build upstream URL: {0}")]
    InvalidEndpoint(String),
}

/// A resource on the upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Sets,
    Set(String),
    Cards,
    Card(String),
}

impl Endpoint {
    /// Path segments relative to the upstream base URL
    fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Sets => vec!["sets"],
            Endpoint::Set(id) => vec!["sets", id.as_str()],
            Endpoint::Cards => vec!["cards"],
            Endpoint::Card(id) => vec!["cards", id.as_str()],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}

/// Issues calls against the configured upstream.
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forwarder")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Forwarder {
    /// Build a forwarder with its own HTTP client from configuration
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(
            client,
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Build a forwarder around an existing client
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid upstream URL: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "Upstream URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            api_key,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full upstream URL for an endpoint, with the raw query appended verbatim
    pub fn endpoint_url(&self, endpoint: &Endpoint, query: Option<&str>) -> Result<Url, ForwardError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ForwardError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments());

        url.set_query(query.filter(|q| !q.is_empty()));

        Ok(url)
    }

    /// Forward a GET for `endpoint` and return the upstream JSON untouched
    pub async fn forward(&self, endpoint: &Endpoint, query: Option<&str>) -> Result<Value, ForwardError> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!(%endpoint, url = %url, "Forwarding request upstream");

        let mut request = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(%endpoint, %status, body = %body, "Upstream returned an error status");
                return Err(ForwardError::Status(status));
            }

            let bytes = response.bytes().await?;
            let payload: Value = serde_json::from_slice(&bytes)?;
            Ok::<_, ForwardError>(payload)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%endpoint, timeout = ?self.timeout, "Upstream request timed out");
                Err(ForwardError::Timeout(self.timeout))
            }
        }
    }
}
