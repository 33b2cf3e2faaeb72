use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationError;

/// Error taxonomy for the upstream adapter.
///
/// `Upstream` preserves the rejecting status code and body verbatim so
/// callers can react to e.g. rate limiting; `InvalidShape` covers 2xx
/// responses whose content fails contract validation and is surfaced to end
/// users as a fixed bad-gateway message.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External API error: {status}")]
    Upstream { status: u16, payload: Value },

    #[error("Invalid upstream response shape: {0}")]
    InvalidShape(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, UpstreamError>;
