mod api;
pub mod config;
pub mod draft;
pub mod error;
pub(crate) mod http;

pub use config::FineTuneClientConfig;
pub use draft::{DraftStorage, DraftStore, FileStorage, MemoryStorage, DRAFT_STORAGE_KEY};
pub use error::{FineTuneClientError, Result};

pub use finetune::{
    CreateJobPayload, DraftPayload, Job, JobMutationResponse, JobStatus, JobSummary, JobsResponse,
    ModelOption,
};

use http::HttpClient;

/// Async HTTP client for the fine-tune console's same-origin proxy.
///
/// This is the UI side of the system: data-fetching hooks call these
/// methods and render the canonical records they return. All requests go to
/// the proxy, never directly upstream.
///
/// `FineTuneClient` is `Clone` — the underlying `reqwest::Client` uses an
/// `Arc` internally, so clones share the same connection pool.
#[derive(Clone)]
pub struct FineTuneClient {
    pub(crate) http: HttpClient,
}

impl FineTuneClient {
    pub fn new(config: FineTuneClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(&config)?,
        })
    }
}
