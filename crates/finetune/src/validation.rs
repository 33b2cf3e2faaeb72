//! Creation-payload validation contract, shared client- and server-side.
//!
//! The rules mirror the wizard's steps: step 1 names the job and picks a
//! base model, step 2 sets epochs and learning rate, step 3 is review-only.
//! `parse_create_payload` additionally coerces an untyped JSON body (numbers
//! may arrive as numeric strings from form state) before applying the same
//! rules.

use serde_json::{Map, Value};

use crate::contracts::{CreateJobPayload, DraftPayload};

pub const JOB_NAME_MIN: usize = 3;
pub const JOB_NAME_MAX: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Wire-format field name the issue targets, e.g. `evaluationEpochs`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(field, message)],
        }
    }

    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn check_job_name(name: &str, issues: &mut Vec<ValidationIssue>) {
    if name.chars().count() < JOB_NAME_MIN {
        issues.push(ValidationIssue::new(
            "jobName",
            "Job name must be at least 3 characters",
        ));
    }
    if name.chars().count() > JOB_NAME_MAX {
        issues.push(ValidationIssue::new(
            "jobName",
            "Job name cannot exceed 50 characters",
        ));
    }
    if !name.is_empty() && !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        issues.push(ValidationIssue::new(
            "jobName",
            "Only alphanumeric characters and dashes are allowed",
        ));
    }
}

fn check_base_model(id: &str, issues: &mut Vec<ValidationIssue>) {
    if id.is_empty() {
        issues.push(ValidationIssue::new("baseModelId", "Select a base model"));
    }
}

fn check_training_epochs(epochs: u64, issues: &mut Vec<ValidationIssue>) {
    if epochs < 1 {
        issues.push(ValidationIssue::new(
            "trainingEpochs",
            "Training epochs must be at least 1",
        ));
    }
}

fn check_learning_rate(rate: f64, issues: &mut Vec<ValidationIssue>) {
    if !(rate > 0.0) {
        issues.push(ValidationIssue::new(
            "learningRate",
            "Learning rate must be greater than 0",
        ));
    } else if rate > 1.0 {
        issues.push(ValidationIssue::new(
            "learningRate",
            "Learning rate must not exceed 1",
        ));
    }
}

fn check_epoch_budget(
    training: u64,
    evaluation: u64,
    warmup: u64,
    issues: &mut Vec<ValidationIssue>,
) {
    if evaluation + warmup > training {
        issues.push(ValidationIssue::new(
            "evaluationEpochs",
            "Evaluation epochs must be less than or equal to training epochs minus warm-up epochs",
        ));
        issues.push(ValidationIssue::new(
            "warmupEpochs",
            "Warm-up epochs must be less than or equal to training epochs minus evaluation epochs",
        ));
    }
}

/// Validate a fully-typed creation payload against the complete contract.
pub fn validate_create_payload(payload: &CreateJobPayload) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    check_job_name(&payload.job_name, &mut issues);
    check_base_model(&payload.base_model_id, &mut issues);
    check_training_epochs(payload.training_epochs, &mut issues);
    check_learning_rate(payload.learning_rate, &mut issues);
    check_epoch_budget(
        payload.training_epochs,
        payload.evaluation_epochs,
        payload.warmup_epochs,
        &mut issues,
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn coerce_string(
    obj: &Map<String, Value>,
    field: &str,
    required_message: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) | None => {
            issues.push(ValidationIssue::new(field, required_message));
            None
        }
    }
}

fn coerce_epochs(
    obj: &Map<String, Value>,
    field: &str,
    label: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<u64> {
    let value = match obj.get(field) {
        Some(v) => v,
        None => {
            issues.push(ValidationIssue::new(field, format!("{label} is required")));
            return None;
        }
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n < 0.0 => {
            issues.push(ValidationIssue::new(
                field,
                format!("{label} cannot be negative"),
            ));
            None
        }
        Some(n) if n.fract() != 0.0 => {
            issues.push(ValidationIssue::new(
                field,
                format!("{label} must be an integer"),
            ));
            None
        }
        Some(n) => Some(n as u64),
        None => {
            issues.push(ValidationIssue::new(
                field,
                format!("{label} must be a number"),
            ));
            None
        }
    }
}

fn coerce_learning_rate(
    obj: &Map<String, Value>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
    let number = match obj.get("learningRate") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if number.is_none() {
        issues.push(ValidationIssue::new(
            "learningRate",
            "Learning rate must be a number",
        ));
    }
    number
}

/// Coerce and validate an untyped creation request body.
///
/// Collects every issue rather than stopping at the first, so the wizard can
/// surface all of them at once.
pub fn parse_create_payload(value: &Value) -> Result<CreateJobPayload, ValidationError> {
    let obj = value.as_object().ok_or_else(|| {
        ValidationError::single("payload", "Expected a JSON object")
    })?;

    let mut issues = Vec::new();

    let job_name = coerce_string(obj, "jobName", "Job name is required", &mut issues);
    let base_model_id = coerce_string(obj, "baseModelId", "Select a base model", &mut issues);
    let training_epochs = coerce_epochs(obj, "trainingEpochs", "Training epochs", &mut issues);
    let evaluation_epochs =
        coerce_epochs(obj, "evaluationEpochs", "Evaluation epochs", &mut issues);
    let warmup_epochs = coerce_epochs(obj, "warmupEpochs", "Warm-up epochs", &mut issues);
    let learning_rate = coerce_learning_rate(obj, &mut issues);

    if let Some(name) = &job_name {
        check_job_name(name, &mut issues);
    }
    if let Some(id) = &base_model_id {
        check_base_model(id, &mut issues);
    }
    if let Some(epochs) = training_epochs {
        check_training_epochs(epochs, &mut issues);
    }
    if let Some(rate) = learning_rate {
        check_learning_rate(rate, &mut issues);
    }
    if let (Some(training), Some(evaluation), Some(warmup)) =
        (training_epochs, evaluation_epochs, warmup_epochs)
    {
        check_epoch_budget(training, evaluation, warmup, &mut issues);
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(CreateJobPayload {
        job_name: job_name.unwrap_or_default(),
        base_model_id: base_model_id.unwrap_or_default(),
        training_epochs: training_epochs.unwrap_or_default(),
        evaluation_epochs: evaluation_epochs.unwrap_or_default(),
        warmup_epochs: warmup_epochs.unwrap_or_default(),
        learning_rate: learning_rate.unwrap_or_default(),
    })
}

/// Step 1 of the wizard: job name and base model.
pub fn validate_step1(draft: &DraftPayload) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    match &draft.job_name {
        Some(name) => check_job_name(name, &mut issues),
        None => issues.push(ValidationIssue::new("jobName", "Job name is required")),
    }
    match &draft.base_model_id {
        Some(id) => check_base_model(id, &mut issues),
        None => issues.push(ValidationIssue::new("baseModelId", "Select a base model")),
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Step 2 of the wizard: epoch counts and learning rate.
pub fn validate_step2(draft: &DraftPayload) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    match draft.training_epochs {
        Some(epochs) => check_training_epochs(epochs, &mut issues),
        None => issues.push(ValidationIssue::new(
            "trainingEpochs",
            "Training epochs is required",
        )),
    }
    if draft.evaluation_epochs.is_none() {
        issues.push(ValidationIssue::new(
            "evaluationEpochs",
            "Evaluation epochs is required",
        ));
    }
    if draft.warmup_epochs.is_none() {
        issues.push(ValidationIssue::new(
            "warmupEpochs",
            "Warm-up epochs is required",
        ));
    }
    match draft.learning_rate {
        Some(rate) => check_learning_rate(rate, &mut issues),
        None => issues.push(ValidationIssue::new(
            "learningRate",
            "Learning rate is required",
        )),
    }
    if let (Some(training), Some(evaluation), Some(warmup)) = (
        draft.training_epochs,
        draft.evaluation_epochs,
        draft.warmup_epochs,
    ) {
        check_epoch_budget(training, evaluation, warmup, &mut issues);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Step 3 is a read-only review screen; any draft passes.
pub fn validate_step3(_draft: &DraftPayload) -> Result<(), ValidationError> {
    Ok(())
}

/// Validate a completed draft and produce the typed creation payload.
pub fn complete_draft(draft: &DraftPayload) -> Result<CreateJobPayload, ValidationError> {
    validate_step1(draft)?;
    validate_step2(draft)?;

    let payload = CreateJobPayload {
        job_name: draft.job_name.clone().unwrap_or_default(),
        base_model_id: draft.base_model_id.clone().unwrap_or_default(),
        training_epochs: draft.training_epochs.unwrap_or_default(),
        evaluation_epochs: draft.evaluation_epochs.unwrap_or_default(),
        warmup_epochs: draft.warmup_epochs.unwrap_or_default(),
        learning_rate: draft.learning_rate.unwrap_or_default(),
    };
    validate_create_payload(&payload)?;
    Ok(payload)
}
