pub mod config;
pub mod contracts;
pub mod error;
pub mod normalize;
pub mod upstream;
pub mod validation;

pub use config::UpstreamConfig;
pub use contracts::{
    CreateJobPayload, DraftPayload, Job, JobMutationResponse, JobStatus, JobSummary, JobsResponse,
    ModelOption,
};
pub use error::{Result, UpstreamError};
pub use upstream::UpstreamClient;
pub use validation::{ValidationError, ValidationIssue};
