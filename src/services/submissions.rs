use uuid::Uuid;

use crate::client::errors::ApiError;
use crate::client::ApiClient;
use crate::schemas::{Submission, SubmissionCreate};

#[derive(Debug, Clone)]
pub(crate) struct SubmissionService {
    client: ApiClient,
}

impl SubmissionService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Creates the attempt. The backend grades within the same request cycle,
    /// so the returned record may already carry score and feedback.
    pub(crate) async fn create(&self, payload: SubmissionCreate) -> Result<Submission, ApiError> {
        self.client.post("/submissions", &payload).await
    }

    pub(crate) async fn list(&self) -> Result<Vec<Submission>, ApiError> {
        self.client.get("/submissions", &[]).await
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Submission, ApiError> {
        self.client.get(&format!("/submissions/{id}"), &[]).await
    }
}
