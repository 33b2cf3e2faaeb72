use std::sync::Arc;

use finetune::{UpstreamClient, UpstreamConfig, UpstreamError};

/// Shared route state: the single upstream adapter.
///
/// The adapter holds no mutable state, so concurrent requests share one
/// instance (and its connection pool) freely.
pub struct AppState {
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Build the state from the environment, failing fast on missing
    /// upstream credentials before the server starts listening.
    pub fn from_env() -> Result<Arc<Self>, UpstreamError> {
        Ok(Arc::new(Self {
            upstream: UpstreamClient::from_env()?,
        }))
    }

    pub fn with_config(config: UpstreamConfig) -> Result<Arc<Self>, UpstreamError> {
        Ok(Arc::new(Self {
            upstream: UpstreamClient::new(config)?,
        }))
    }
}
