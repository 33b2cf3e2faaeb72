use reqwest::StatusCode;
use serde_json::Value;

use crate::config::FineTuneClientConfig;
use crate::error::{FineTuneClientError, Result};

#[derive(Clone)]
pub(crate) struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub(crate) fn new(config: &FineTuneClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Option<Value>> {
        let resp = self.inner.get(self.url(path)).send().await?;
        self.parse(resp).await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>> {
        let resp = self.inner.post(self.url(path)).json(body).send().await?;
        self.parse(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Option<Value>> {
        let resp = self.inner.delete(self.url(path)).send().await?;
        self.parse(resp).await
    }

    /// Success bodies parse to JSON (`None` for 204 or an empty body);
    /// failures surface the body's `message` or `error` field, falling back
    /// to the raw text.
    async fn parse(&self, resp: reqwest::Response) -> Result<Option<Value>> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FineTuneClientError::Server {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        if text.is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let value = serde_json::from_str(&text)
            .map_err(|e| FineTuneClientError::Contract(format!("response is not JSON: {e}")))?;
        Ok(Some(value))
    }
}

fn extract_error_message(text: &str) -> String {
    if text.is_empty() {
        return "Request failed".to_string();
    }

    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            ["message", "error"].iter().find_map(|key| {
                body.get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| text.to_string())
}
