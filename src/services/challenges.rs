use uuid::Uuid;

use crate::client::errors::ApiError;
use crate::client::ApiClient;
use crate::schemas::{Challenge, ChallengeCategory, ChallengeDifficulty};

#[derive(Debug, Clone)]
pub(crate) struct ChallengeService {
    client: ApiClient,
}

impl ChallengeService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Flat list, optionally narrowed server-side by category and difficulty.
    pub(crate) async fn list(
        &self,
        category: Option<ChallengeCategory>,
        difficulty: Option<ChallengeDifficulty>,
    ) -> Result<Vec<Challenge>, ApiError> {
        let mut query = Vec::new();
        if let Some(category) = category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(difficulty) = difficulty {
            query.push(("difficulty", difficulty.as_str().to_string()));
        }
        self.client.get("/challenges/", &query).await
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Challenge, ApiError> {
        self.client.get(&format!("/challenges/{id}/"), &[]).await
    }
}
