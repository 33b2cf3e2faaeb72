use utoipa::OpenApi;

use finetune::{
    CreateJobPayload, DraftPayload, Job, JobStatus, JobSummary, JobsResponse, ModelOption,
};

use crate::routes::errors::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::jobs::list_jobs,
        super::routes::jobs::create_job,
        super::routes::jobs::delete_job,
        super::routes::models::list_models,
    ),
    components(schemas(
        Job,
        JobStatus,
        JobSummary,
        JobsResponse,
        ModelOption,
        CreateJobPayload,
        DraftPayload,
        ErrorBody,
    )),
    tags(
        (name = "jobs", description = "Fine-tuning job listing, creation and deletion"),
        (name = "models", description = "Base-model catalog")
    )
)]
pub struct ApiDoc;
