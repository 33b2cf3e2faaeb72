pub mod errors;
pub mod jobs;
pub mod models;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub fn configure(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(jobs::routes(state.clone()))
        .merge(models::routes(state))
}
