//! Pure mapping from upstream wire shapes to the canonical contract.
//!
//! The upstream API is inconsistent about field naming (snake_case vs
//! camelCase, several synonyms for the same concept), so every lookup goes
//! through a priority-ordered synonym table. Adding a newly-observed synonym
//! is a one-line table edit, not a logic change.
//!
//! Status handling is strict: values outside the mapping table are a
//! structured [`UpstreamError::InvalidShape`], never silently defaulted.

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::contracts::{
    CreateJobPayload, Job, JobStatus, JobSummary, JobsResponse, ModelOption,
};
use crate::error::UpstreamError;

const JOB_ID_KEYS: &[&str] = &["id", "jobId", "job_id"];
const JOB_NAME_KEYS: &[&str] = &["name", "jobName", "job_name"];
const BASE_MODEL_KEYS: &[&str] = &["baseModel", "base_model", "model"];
const CREATED_AT_KEYS: &[&str] = &["createdAt", "created_at", "date"];
const TRAINING_EPOCHS_KEYS: &[&str] = &["trainingEpochs", "training_epochs", "epochs"];
const EVALUATION_EPOCHS_KEYS: &[&str] = &["evaluationEpochs", "evaluation_epochs"];
const WARMUP_EPOCHS_KEYS: &[&str] = &["warmupEpochs", "warmup_epochs"];
const LEARNING_RATE_KEYS: &[&str] = &["learningRate", "learning_rate"];

const MODEL_ID_KEYS: &[&str] = &["id", "modelId", "model_id", "name"];
const MODEL_LABEL_KEYS: &[&str] = &["name", "label", "model_name", "displayName"];

/// Exact status vocabulary accepted from upstream. Canonical lowercase forms
/// map to themselves so normalizing an already-normalized payload is a no-op.
const STATUS_TABLE: &[(&str, JobStatus)] = &[
    ("Running", JobStatus::Running),
    ("Completed", JobStatus::Completed),
    ("Failed", JobStatus::Failed),
    ("running", JobStatus::Running),
    ("completed", JobStatus::Completed),
    ("failed", JobStatus::Failed),
];

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| obj.get(*key))
        .filter(|value| !value.is_null())
}

fn required_string(
    obj: &Map<String, Value>,
    keys: &[&str],
    what: &str,
) -> Result<String, UpstreamError> {
    match first_present(obj, keys) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(other) => Err(UpstreamError::InvalidShape(format!(
            "job {what} must be a string, got {other}"
        ))),
        None => Err(UpstreamError::InvalidShape(format!(
            "job entry missing {what} (looked for {})",
            keys.join(", ")
        ))),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn numeric_field(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    first_present(obj, keys)
        .and_then(coerce_number)
        .unwrap_or(0.0)
}

fn epoch_field(obj: &Map<String, Value>, keys: &[&str]) -> u64 {
    let value = numeric_field(obj, keys);
    if value > 0.0 {
        value as u64
    } else {
        0
    }
}

pub fn map_status(raw: &str) -> Result<JobStatus, UpstreamError> {
    STATUS_TABLE
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, status)| *status)
        .ok_or_else(|| UpstreamError::InvalidShape(format!("unrecognized job status {raw:?}")))
}

fn created_at_field(obj: &Map<String, Value>) -> Result<String, UpstreamError> {
    let raw = required_string(obj, CREATED_AT_KEYS, "creation timestamp")?;
    DateTime::parse_from_rfc3339(&raw).map_err(|e| {
        UpstreamError::InvalidShape(format!("creation timestamp {raw:?} is not RFC 3339: {e}"))
    })?;
    // Stored verbatim; re-serializing through chrono would change formatting.
    Ok(raw)
}

/// Normalize a single upstream job entry into the canonical [`Job`].
pub fn normalize_job(entry: &Value) -> Result<Job, UpstreamError> {
    let obj = entry.as_object().ok_or_else(|| {
        UpstreamError::InvalidShape(format!("job entry must be an object, got {entry}"))
    })?;

    let status_raw = match first_present(obj, &["status"]) {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(UpstreamError::InvalidShape(format!(
                "job status must be a string, got {other}"
            )))
        }
        None => return Err(UpstreamError::InvalidShape("job entry missing status".into())),
    };

    Ok(Job {
        id: required_string(obj, JOB_ID_KEYS, "id")?,
        name: required_string(obj, JOB_NAME_KEYS, "name")?,
        status: map_status(status_raw)?,
        base_model: required_string(obj, BASE_MODEL_KEYS, "base model")?,
        created_at: created_at_field(obj)?,
        training_epochs: epoch_field(obj, TRAINING_EPOCHS_KEYS),
        evaluation_epochs: epoch_field(obj, EVALUATION_EPOCHS_KEYS),
        warmup_epochs: epoch_field(obj, WARMUP_EPOCHS_KEYS),
        learning_rate: numeric_field(obj, LEARNING_RATE_KEYS),
    })
}

/// Count canonical statuses; the result always sums to `jobs.len()`.
pub fn derive_summary(jobs: &[Job]) -> JobSummary {
    jobs.iter().fold(JobSummary::default(), |mut acc, job| {
        match job.status {
            JobStatus::Running => acc.running += 1,
            JobStatus::Completed => acc.completed += 1,
            JobStatus::Failed => acc.failed += 1,
        }
        acc
    })
}

fn summary_field(summary: Option<&Map<String, Value>>, key: &str, derived: u64) -> u64 {
    summary
        .and_then(|obj| obj.get(key))
        .and_then(Value::as_u64)
        .unwrap_or(derived)
}

/// Normalize a full upstream jobs payload: either a bare array of job
/// entries or an object wrapping them under `jobs`, with an optional
/// `summary`. An upstream summary wins field-by-field even when it
/// disagrees with the job list; only absent fields fall back to the
/// derived counts.
pub fn normalize_jobs_payload(payload: &Value) -> Result<JobsResponse, UpstreamError> {
    let (entries, summary_obj) = match payload {
        Value::Array(entries) => (entries, None),
        Value::Object(obj) => match obj.get("jobs") {
            Some(Value::Array(entries)) => {
                (entries, obj.get("summary").and_then(Value::as_object))
            }
            Some(other) => {
                return Err(UpstreamError::InvalidShape(format!(
                    "jobs field must be an array, got {other}"
                )))
            }
            None => {
                return Err(UpstreamError::InvalidShape(
                    "jobs payload has no jobs array".into(),
                ))
            }
        },
        other => {
            return Err(UpstreamError::InvalidShape(format!(
                "jobs payload must be an array or object, got {other}"
            )))
        }
    };

    let jobs = entries
        .iter()
        .map(normalize_job)
        .collect::<Result<Vec<_>, _>>()?;

    let derived = derive_summary(&jobs);
    let summary = JobSummary {
        running: summary_field(summary_obj, "running", derived.running),
        completed: summary_field(summary_obj, "completed", derived.completed),
        failed: summary_field(summary_obj, "failed", derived.failed),
    };

    Ok(JobsResponse { jobs, summary })
}

/// Normalize a single model entry; `None` means the entry carries no usable
/// id and is dropped rather than failing the whole list.
pub fn normalize_model(entry: &Value) -> Option<ModelOption> {
    match entry {
        Value::String(s) if !s.is_empty() => Some(ModelOption {
            id: s.clone(),
            name: s.clone(),
        }),
        Value::Object(obj) => {
            let id = first_present(obj, MODEL_ID_KEYS).and_then(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })?;
            let name = first_present(obj, MODEL_LABEL_KEYS)
                .and_then(Value::as_str)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| id.clone());
            Some(ModelOption { id, name })
        }
        _ => None,
    }
}

/// Normalize a models payload: bare array or `{models: [...]}`.
pub fn normalize_models_payload(payload: &Value) -> Result<Vec<ModelOption>, UpstreamError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(obj) => match obj.get("models") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(UpstreamError::InvalidShape(
                    "models payload has no models array".into(),
                ))
            }
        },
        other => {
            return Err(UpstreamError::InvalidShape(format!(
                "models payload must be an array or object, got {other}"
            )))
        }
    };

    Ok(entries.iter().filter_map(normalize_model).collect())
}

/// Map the canonical creation request to the external request shape.
pub fn to_external_create_payload(payload: &CreateJobPayload) -> Value {
    serde_json::json!({
        "name": payload.job_name,
        "baseModel": payload.base_model_id,
        "epochs": payload.training_epochs,
        "evaluationEpochs": payload.evaluation_epochs,
        "warmupEpochs": payload.warmup_epochs,
        "learningRate": payload.learning_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snake_case_job() -> Value {
        json!({
            "job_id": "job-1",
            "job_name": "Training",
            "status": "Completed",
            "base_model": "base-1",
            "created_at": "2026-01-01T00:00:00.000Z",
            "epochs": 4,
            "evaluation_epochs": 1,
            "warmup_epochs": 1,
            "learning_rate": 0.0001
        })
    }

    fn camel_case_job() -> Value {
        json!({
            "id": "job-2",
            "name": "Another",
            "status": "Failed",
            "baseModel": "base-2",
            "createdAt": "2026-01-02T00:00:00.000Z",
            "trainingEpochs": 2,
            "evaluationEpochs": 1,
            "warmupEpochs": 1,
            "learningRate": 0.0002
        })
    }

    #[test]
    fn normalizes_snake_case_job() {
        let job = normalize_job(&snake_case_job()).unwrap();
        assert_eq!(job.id, "job-1");
        assert_eq!(job.name, "Training");
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.base_model, "base-1");
        assert_eq!(job.created_at, "2026-01-01T00:00:00.000Z");
        assert_eq!(job.training_epochs, 4);
        assert_eq!(job.learning_rate, 0.0001);
    }

    #[test]
    fn maps_capitalized_statuses() {
        assert_eq!(map_status("Completed").unwrap(), JobStatus::Completed);
        assert_eq!(map_status("Running").unwrap(), JobStatus::Running);
        assert_eq!(map_status("Failed").unwrap(), JobStatus::Failed);
    }

    #[test]
    fn rejects_unrecognized_status() {
        let mut entry = camel_case_job();
        entry["status"] = json!("Paused");
        let err = normalize_job(&entry).unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidShape(_)));
        assert!(err.to_string().contains("Paused"));
    }

    #[test]
    fn date_synonym_priority_prefers_created_at() {
        let mut entry = camel_case_job();
        entry["date"] = json!("2030-12-31T00:00:00Z");
        let job = normalize_job(&entry).unwrap();
        assert_eq!(job.created_at, "2026-01-02T00:00:00.000Z");

        let mut entry = camel_case_job();
        entry.as_object_mut().unwrap().remove("createdAt");
        entry["date"] = json!("2030-12-31T00:00:00Z");
        let job = normalize_job(&entry).unwrap();
        assert_eq!(job.created_at, "2030-12-31T00:00:00Z");
    }

    #[test]
    fn rejects_non_rfc3339_timestamp() {
        let mut entry = camel_case_job();
        entry["createdAt"] = json!("yesterday");
        assert!(matches!(
            normalize_job(&entry),
            Err(UpstreamError::InvalidShape(_))
        ));
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let entry = json!({
            "id": "job-3",
            "name": "Sparse",
            "status": "Running",
            "model": "base-3",
            "date": "2026-01-03T00:00:00Z"
        });
        let job = normalize_job(&entry).unwrap();
        assert_eq!(job.training_epochs, 0);
        assert_eq!(job.evaluation_epochs, 0);
        assert_eq!(job.warmup_epochs, 0);
        assert_eq!(job.learning_rate, 0.0);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut entry = camel_case_job();
        entry["trainingEpochs"] = json!("12");
        entry["learningRate"] = json!("0.005");
        let job = normalize_job(&entry).unwrap();
        assert_eq!(job.training_epochs, 12);
        assert_eq!(job.learning_rate, 0.005);
    }

    #[test]
    fn missing_id_is_invalid_shape() {
        let entry = json!({
            "name": "NoId",
            "status": "Running",
            "baseModel": "base",
            "createdAt": "2026-01-01T00:00:00Z"
        });
        let err = normalize_job(&entry).unwrap_err();
        assert!(err.to_string().contains("job_id"));
    }

    #[test]
    fn derives_summary_when_absent() {
        let payload = json!({"jobs": [snake_case_job(), camel_case_job()]});
        let response = normalize_jobs_payload(&payload).unwrap();
        assert_eq!(
            response.summary,
            JobSummary {
                running: 0,
                completed: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn derived_summary_sums_to_job_count() {
        let payload = json!([snake_case_job(), camel_case_job()]);
        let response = normalize_jobs_payload(&payload).unwrap();
        let total =
            response.summary.running + response.summary.completed + response.summary.failed;
        assert_eq!(total, response.jobs.len() as u64);
    }

    #[test]
    fn upstream_summary_is_trusted_even_when_inconsistent() {
        let payload = json!({
            "jobs": [snake_case_job()],
            "summary": {"running": 7, "completed": 0, "failed": 0}
        });
        let response = normalize_jobs_payload(&payload).unwrap();
        assert_eq!(response.summary.running, 7);
        assert_eq!(response.summary.completed, 0);
    }

    #[test]
    fn partial_upstream_summary_falls_back_per_field() {
        let payload = json!({
            "jobs": [snake_case_job(), camel_case_job()],
            "summary": {"running": 3}
        });
        let response = normalize_jobs_payload(&payload).unwrap();
        assert_eq!(response.summary.running, 3);
        assert_eq!(response.summary.completed, 1);
        assert_eq!(response.summary.failed, 1);
    }

    #[test]
    fn normalizing_canonical_payload_is_a_no_op() {
        let canonical = normalize_jobs_payload(&json!([snake_case_job(), camel_case_job()]))
            .unwrap();
        let reserialized = serde_json::to_value(&canonical).unwrap();
        let renormalized = normalize_jobs_payload(&reserialized).unwrap();
        assert_eq!(renormalized, canonical);
    }

    #[test]
    fn bare_string_model_uses_value_for_id_and_name() {
        let model = normalize_model(&json!("model-a")).unwrap();
        assert_eq!(model.id, "model-a");
        assert_eq!(model.name, "model-a");
    }

    #[test]
    fn mixed_model_payload_shapes() {
        let payload = json!({
            "models": ["model-a", {"model_id": "model-b", "model_name": "Model B"}]
        });
        let models = normalize_models_payload(&payload).unwrap();
        assert_eq!(
            models,
            vec![
                ModelOption {
                    id: "model-a".to_string(),
                    name: "model-a".to_string()
                },
                ModelOption {
                    id: "model-b".to_string(),
                    name: "Model B".to_string()
                },
            ]
        );
    }

    #[test]
    fn model_entries_without_usable_id_are_dropped() {
        let payload = json!([
            {"label": "No id here"},
            42,
            null,
            {"id": "", "name": "empty"},
            {"modelId": "kept"}
        ]);
        let models = normalize_models_payload(&payload).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "kept");
        assert_eq!(models[0].name, "kept");
    }

    #[test]
    fn model_name_falls_back_to_id() {
        let model = normalize_model(&json!({"id": "base-7"})).unwrap();
        assert_eq!(model.name, "base-7");
    }

    #[test]
    fn create_payload_maps_to_external_shape() {
        let payload = CreateJobPayload {
            job_name: "my-job".to_string(),
            base_model_id: "base-model".to_string(),
            training_epochs: 10,
            evaluation_epochs: 3,
            warmup_epochs: 1,
            learning_rate: 0.001,
        };
        assert_eq!(
            to_external_create_payload(&payload),
            json!({
                "name": "my-job",
                "baseModel": "base-model",
                "epochs": 10,
                "evaluationEpochs": 3,
                "warmupEpochs": 1,
                "learningRate": 0.001
            })
        );
    }
}
