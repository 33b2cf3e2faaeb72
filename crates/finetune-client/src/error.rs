use thiserror::Error;

use finetune::ValidationError;

#[derive(Error, Debug)]
pub enum FineTuneClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a failure status; `message` is the `message`
    /// or `error` field of the body when present, the raw text otherwise.
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Contract(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Draft storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FineTuneClientError>;
