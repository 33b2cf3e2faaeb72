use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use finetune::ModelOption;

use crate::routes::errors::{ErrorBody, ErrorResponse};
use crate::state::AppState;

/// List base models available for fine-tuning
#[utoipa::path(
    get,
    path = "/api/models",
    responses(
        (status = 200, description = "Normalized model options", body = Vec<ModelOption>),
        (status = 502, description = "Upstream returned an unrecognizable payload", body = ErrorBody),
        (status = 500, description = "Configuration or internal error", body = ErrorBody)
    ),
    tag = "models"
)]
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ModelOption>>, ErrorResponse> {
    let models = state.upstream.fetch_models().await?;
    Ok(Json(models))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/models", get(list_models))
        .with_state(state)
}
