use finetune::contracts::{parse_jobs_response, parse_mutation_response};
use finetune::validation::validate_create_payload;
use finetune::{CreateJobPayload, JobMutationResponse, JobsResponse};

use crate::error::{FineTuneClientError, Result};
use crate::FineTuneClient;

impl FineTuneClient {
    /// Fetch the job list with its summary from the proxy.
    pub async fn get_jobs(&self) -> Result<JobsResponse> {
        let body = self.http.get("/api/jobs").await?.ok_or_else(|| {
            FineTuneClientError::Contract("jobs response had no body".to_string())
        })?;
        parse_jobs_response(body).map_err(|e| FineTuneClientError::Contract(e.to_string()))
    }

    /// Validate the payload locally, then submit it for creation.
    ///
    /// Validation failures never reach the network; they surface as
    /// [`FineTuneClientError::Validation`] with field-targeted messages.
    pub async fn post_job(&self, payload: &CreateJobPayload) -> Result<JobMutationResponse> {
        validate_create_payload(payload)?;
        let body = serde_json::to_value(payload)
            .map_err(|e| FineTuneClientError::Contract(e.to_string()))?;
        match self.http.post("/api/jobs", &body).await? {
            Some(ack) => parse_mutation_response(ack)
                .map_err(|e| FineTuneClientError::Contract(e.to_string())),
            None => Ok(None),
        }
    }

    /// Delete a job by id; resolves to `None` when the proxy answers 204.
    pub async fn delete_job(&self, job_id: &str) -> Result<JobMutationResponse> {
        let path = format!("/api/jobs/{}", urlencoding::encode(job_id));
        match self.http.delete(&path).await? {
            Some(ack) => parse_mutation_response(ack)
                .map_err(|e| FineTuneClientError::Contract(e.to_string())),
            None => Ok(None),
        }
    }
}
