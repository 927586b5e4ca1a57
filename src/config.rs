use crate::error::{AppError, AppResult};
use http::HeaderValue;
use serde::Deserialize;
use std::env;
use url::Url;

mod cors;
mod server;
mod upstream;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.pokemontcg.io/v2";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Configuration("Invalid PORT".to_string()))?,
            None => DEFAULT_PORT,
        };

        let base_url =
            lookup("POKEMON_TCG_API_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        // An empty key behaves like no key at all
        let api_key = lookup("POKEMON_TCG_API_KEY").filter(|key| !key.trim().is_empty());
        let timeout_seconds = match lookup("UPSTREAM_TIMEOUT_SECONDS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Configuration("Invalid UPSTREAM_TIMEOUT_SECONDS".to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let allowed_origins_str =
            lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());
        let allowed_origins: Vec<String> = allowed_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server: ServerConfig { host, port },
            upstream: UpstreamConfig {
                base_url,
                api_key,
                timeout_seconds,
            },
            cors: CorsConfig { allowed_origins },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        let base = Url::parse(&self.upstream.base_url).map_err(|e| {
            AppError::Configuration(format!("POKEMON_TCG_API_URL is not a valid URL: {}", e))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::Configuration(
                "POKEMON_TCG_API_URL must use http or https".to_string(),
            ));
        }

        if self.upstream.timeout_seconds == 0 {
            return Err(AppError::Configuration(
                "UPSTREAM_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }

        if let Some(key) = &self.upstream.api_key {
            HeaderValue::from_str(key).map_err(|_| {
                AppError::Configuration(
                    "POKEMON_TCG_API_KEY contains characters not allowed in a header".to_string(),
                )
            })?;
        }

        // Origins end up in Access-Control-Allow-Origin verbatim
        if let Some(bad) = self
            .cors
            .allowed_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(AppError::Configuration(format!(
                "ALLOWED_ORIGINS contains an invalid origin: {}",
                bad
            )));
        }

        Ok(())
    }
}
