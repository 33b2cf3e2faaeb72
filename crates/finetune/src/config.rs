use std::env;

use crate::error::UpstreamError;

pub const API_KEY_ENV: &str = "FINE_TUNE_API_KEY";
pub const BASE_URL_ENV: &str = "FINE_TUNE_API_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://fe-test-api-production-cb39.up.railway.app";

/// Upstream credentials and endpoint, resolved from the environment.
///
/// The API key is required and construction fails fast without it; the base
/// URL falls back to the production endpoint when unset.
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, UpstreamError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                UpstreamError::Config(format!("Missing {API_KEY_ENV} environment variable"))
            })?;
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { base_url, api_key })
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}
