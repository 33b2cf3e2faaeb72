use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the same-origin proxy.
///
/// No credentials: the proxy authenticates to the upstream API itself.
#[derive(Debug, Clone)]
pub struct FineTuneClientConfig {
    pub(crate) base_url: String,
    pub(crate) connect_timeout: Duration,
}

impl FineTuneClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
