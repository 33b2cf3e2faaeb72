//! HTTP adapter for the upstream training API.
//!
//! Owns all network I/O: authentication, response classification and
//! delegation to [`crate::normalize`]. One attempt per call — retry policy
//! belongs to callers.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::contracts::{CreateJobPayload, JobMutationResponse, JobsResponse, ModelOption};
use crate::error::{Result, UpstreamError};
use crate::normalize;
use crate::validation::validate_create_payload;

const API_KEY_HEADER: &str = "x-api-key";

pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    pub fn from_env() -> Result<Self> {
        Self::new(UpstreamConfig::from_env()?)
    }

    pub fn new(config: UpstreamConfig) -> Result<Self> {
        // Reject a malformed base URL here so every operation can assume a
        // well-formed endpoint instead of failing mid-request.
        Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::Config(format!("Invalid base URL: {e}")))?;

        let mut auth_value = HeaderValue::from_str(&config.api_key)
            .map_err(|e| UpstreamError::Config(format!("Invalid API key header value: {e}")))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        tracing::debug!(%method, path, "upstream request");
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        self.check_status(response).await
    }

    /// Convert any non-2xx response into a structured upstream rejection
    /// carrying the status code and the error body verbatim.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| {
            let message = if text.is_empty() {
                "Unknown API error".to_string()
            } else {
                text
            };
            serde_json::json!({ "error": message })
        });

        Err(UpstreamError::Upstream {
            status: status.as_u16(),
            payload,
        })
    }

    /// Read a 2xx body as JSON; an unreadable or non-JSON body is an
    /// invalid-shape failure, not an upstream rejection.
    async fn json_body(&self, response: Response) -> Result<Value> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::InvalidShape(format!("response body is not JSON: {e}")))
    }

    async fn mutation_ack(&self, response: Response) -> Result<JobMutationResponse> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::InvalidShape(format!("response body is not JSON: {e}")))?;
        crate::contracts::parse_mutation_response(payload)
    }

    /// GET the job list and normalize it into the canonical response,
    /// deriving the summary when upstream omits one.
    pub async fn fetch_jobs(&self) -> Result<JobsResponse> {
        let response = self.send(Method::GET, "/api/jobs", None).await?;
        let payload = self.json_body(response).await?;
        normalize::normalize_jobs_payload(&payload)
    }

    /// GET the base-model catalog as canonical `{id, name}` options.
    pub async fn fetch_models(&self) -> Result<Vec<ModelOption>> {
        let response = self.send(Method::GET, "/api/models", None).await?;
        let payload = self.json_body(response).await?;
        normalize::normalize_models_payload(&payload)
    }

    /// Validate the creation payload against the full contract, map it to
    /// the external request shape and POST it.
    pub async fn create_job(&self, payload: &CreateJobPayload) -> Result<JobMutationResponse> {
        validate_create_payload(payload)?;
        let body = normalize::to_external_create_payload(payload);
        let response = self.send(Method::POST, "/api/jobs", Some(&body)).await?;
        self.mutation_ack(response).await
    }

    /// DELETE a job by id. A 204 maps to `None`; any other 2xx body is
    /// returned as an opaque record.
    pub async fn delete_job(&self, job_id: &str) -> Result<JobMutationResponse> {
        let path = format!("/api/jobs/{}", urlencoding::encode(job_id));
        let response = self.send(Method::DELETE, &path, None).await?;
        self.mutation_ack(response).await
    }
}
