use finetune::contracts::parse_models_response;
use finetune::ModelOption;

use crate::error::{FineTuneClientError, Result};
use crate::FineTuneClient;

impl FineTuneClient {
    /// Fetch the base-model options offered by the wizard's first step.
    pub async fn get_models(&self) -> Result<Vec<ModelOption>> {
        let body = self.http.get("/api/models").await?.ok_or_else(|| {
            FineTuneClientError::Contract("models response had no body".to_string())
        })?;
        parse_models_response(body).map_err(|e| FineTuneClientError::Contract(e.to_string()))
    }
}
