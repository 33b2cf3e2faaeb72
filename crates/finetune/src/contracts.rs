//! Canonical wire shapes shared by the adapter, the proxy routes and the
//! same-origin client.
//!
//! Everything here is the *internal* contract: already normalized, snake-free
//! and immutable once constructed. The external upstream shapes never leave
//! [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UpstreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub status: JobStatus,
    pub base_model: String,
    /// RFC 3339 timestamp, kept verbatim as received from upstream.
    pub created_at: String,
    pub training_epochs: u64,
    pub evaluation_epochs: u64,
    pub warmup_epochs: u64,
    pub learning_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobSummary {
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
    pub summary: JobSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModelOption {
    pub id: String,
    pub name: String,
}

/// Canonical job-creation request, as submitted by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    pub job_name: String,
    pub base_model_id: String,
    pub training_epochs: u64,
    pub evaluation_epochs: u64,
    pub warmup_epochs: u64,
    pub learning_rate: f64,
}

/// Partially-filled creation payload, as held by the wizard between steps.
///
/// Serialized shape matches [`CreateJobPayload`] with every field optional;
/// absent fields are omitted so a stored draft only records what the user
/// has entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_epochs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_epochs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmup_epochs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
}

impl DraftPayload {
    /// Merge `update` over `self`, field by field; `Some` wins, `None`
    /// leaves the stored value in place.
    pub fn merge(&mut self, update: DraftPayload) {
        if update.job_name.is_some() {
            self.job_name = update.job_name;
        }
        if update.base_model_id.is_some() {
            self.base_model_id = update.base_model_id;
        }
        if update.training_epochs.is_some() {
            self.training_epochs = update.training_epochs;
        }
        if update.evaluation_epochs.is_some() {
            self.evaluation_epochs = update.evaluation_epochs;
        }
        if update.warmup_epochs.is_some() {
            self.warmup_epochs = update.warmup_epochs;
        }
        if update.learning_rate.is_some() {
            self.learning_rate = update.learning_rate;
        }
    }
}

/// Opaque upstream acknowledgment of a mutation; `None` for 204 responses.
pub type JobMutationResponse = Option<Map<String, Value>>;

fn parse_internal<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(payload)
        .map_err(|e| UpstreamError::InvalidShape(format!("internal payload: {e}")))
}

/// Parse an already-normalized jobs payload, e.g. a proxy response body.
pub fn parse_jobs_response(payload: Value) -> Result<JobsResponse, UpstreamError> {
    parse_internal(payload)
}

/// Parse an already-normalized models payload.
pub fn parse_models_response(payload: Value) -> Result<Vec<ModelOption>, UpstreamError> {
    let models: Vec<ModelOption> = parse_internal(payload)?;
    if let Some(model) = models.iter().find(|m| m.id.is_empty()) {
        return Err(UpstreamError::InvalidShape(format!(
            "model option with empty id (name: {:?})",
            model.name
        )));
    }
    Ok(models)
}

/// Parse a mutation acknowledgment: a JSON object or `null`.
pub fn parse_mutation_response(payload: Value) -> Result<JobMutationResponse, UpstreamError> {
    match payload {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(UpstreamError::InvalidShape(format!(
            "mutation acknowledgment must be an object or null, got {other}"
        ))),
    }
}
