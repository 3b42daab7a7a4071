use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One attempt at a challenge. The graded fields (`score`, `max_score`,
/// `feedback`, `grading_details`, `is_correct`) stay absent until the backend
/// grading step has run; re-fetch by id for final values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Submission {
    pub(crate) id: Uuid,
    pub(crate) challenge_id: Uuid,
    pub(crate) user_id: Uuid,
    #[serde(default)]
    pub(crate) code: Option<String>,
    #[serde(default)]
    pub(crate) explanation: Option<String>,
    #[serde(default)]
    pub(crate) score: Option<f64>,
    #[serde(default)]
    pub(crate) max_score: Option<f64>,
    #[serde(default)]
    pub(crate) is_correct: bool,
    #[serde(default)]
    pub(crate) feedback: Option<String>,
    #[serde(default)]
    pub(crate) grading_details: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub(crate) time_taken: Option<i64>,
    #[serde(with = "crate::core::time::timestamp")]
    pub(crate) submitted_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SubmissionCreate {
    pub(crate) challenge_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) explanation: Option<String>,
}
