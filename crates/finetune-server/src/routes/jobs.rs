use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::Value;

use finetune::validation::parse_create_payload;
use finetune::{CreateJobPayload, JobsResponse};

use crate::routes::errors::{ErrorBody, ErrorResponse};
use crate::state::AppState;

/// List jobs with their status summary
#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Normalized job list and summary", body = JobsResponse),
        (status = 502, description = "Upstream returned an unrecognizable payload", body = ErrorBody),
        (status = 500, description = "Configuration or internal error", body = ErrorBody)
    ),
    tag = "jobs"
)]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JobsResponse>, ErrorResponse> {
    let response = state.upstream.fetch_jobs().await?;
    Ok(Json(response))
}

/// Create a fine-tuning job
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Upstream acknowledgment of the created job"),
        (status = 400, description = "Payload failed the creation contract", body = ErrorBody),
        (status = 500, description = "Configuration or internal error", body = ErrorBody)
    ),
    tag = "jobs"
)]
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Response, ErrorResponse> {
    let payload =
        parse_create_payload(&body).map_err(|e| ErrorResponse::bad_request(e.to_string()))?;

    let ack = state.upstream.create_job(&payload).await?;
    let body = ack.map(Value::Object).unwrap_or(Value::Null);
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Delete a job by id
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Upstream acknowledgment body"),
        (status = 204, description = "Deleted with no acknowledgment body"),
        (status = 500, description = "Configuration or internal error", body = ErrorBody)
    ),
    tag = "jobs"
)]
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ErrorResponse> {
    match state.upstream.delete_job(&id).await? {
        Some(ack) => Ok(Json(Value::Object(ack)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route("/api/jobs/{id}", delete(delete_job))
        .with_state(state)
}
