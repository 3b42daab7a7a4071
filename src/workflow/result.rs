use time::OffsetDateTime;
use uuid::Uuid;

use crate::client::errors::ApiError;
use crate::schemas::{Challenge, Submission};
use crate::services::{ChallengeService, SubmissionService};

/// Qualitative banding over the rendered percentage. Thresholds are 80 and
/// 60, inclusive on the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScoreBand {
    Strong,
    Passing,
    NeedsWork,
}

impl ScoreBand {
    pub(crate) fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ScoreBand::Strong
        } else if percentage >= 60 {
            ScoreBand::Passing
        } else {
            ScoreBand::NeedsWork
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "strong",
            ScoreBand::Passing => "passing",
            ScoreBand::NeedsWork => "needs work",
        }
    }
}

/// Absent numeric fields count as zero and a zero max short-circuits, so this
/// can never divide by zero or emit NaN.
pub(crate) fn percentage(score: Option<f64>, max_score: Option<f64>) -> u32 {
    let score = score.unwrap_or(0.0);
    let max_score = max_score.unwrap_or(0.0);
    if max_score <= 0.0 || score <= 0.0 {
        return 0;
    }
    (100.0 * score / max_score).round() as u32
}

/// Where the two-stage load failed, kept distinct so "challenge fetch failed
/// after the submission fetch succeeded" is its own observable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResultError {
    SubmissionNotFound,
    ChallengeNotFound,
    Failed(String),
}

impl ResultError {
    pub(crate) fn message(&self) -> &str {
        match self {
            ResultError::SubmissionNotFound => "Submission not found",
            ResultError::ChallengeNotFound => "Challenge not found",
            ResultError::Failed(message) => message,
        }
    }
}

/// Projection of a graded submission plus its parent challenge, ready for
/// rendering. Everything here is computed client-side from backend values;
/// the client never grades.
#[derive(Debug, Clone)]
pub(crate) struct ResultView {
    pub(crate) challenge_title: String,
    pub(crate) percentage: u32,
    pub(crate) band: ScoreBand,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) is_correct: bool,
    pub(crate) feedback: Option<String>,
    pub(crate) grading_details: Vec<(String, String)>,
    pub(crate) code: Option<String>,
    pub(crate) explanation: Option<String>,
    pub(crate) submitted_at: OffsetDateTime,
}

impl ResultView {
    pub(crate) fn project(submission: Submission, challenge: Challenge) -> Self {
        let percentage = percentage(submission.score, submission.max_score);
        let grading_details = submission
            .grading_details
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, stringify(value)))
            .collect();

        Self {
            challenge_title: challenge.title,
            percentage,
            band: ScoreBand::from_percentage(percentage),
            score: submission.score.unwrap_or(0.0),
            max_score: submission.max_score.unwrap_or(0.0),
            is_correct: submission.is_correct,
            feedback: submission.feedback,
            grading_details,
            code: submission.code,
            explanation: submission.explanation,
            submitted_at: submission.submitted_at,
        }
    }
}

fn stringify(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Two sequential dependent reads: the submission, then its parent challenge.
pub(crate) struct ResultFlow {
    challenges: ChallengeService,
    submissions: SubmissionService,
}

impl ResultFlow {
    pub(crate) fn new(challenges: ChallengeService, submissions: SubmissionService) -> Self {
        Self { challenges, submissions }
    }

    pub(crate) async fn load(&self, submission_id: Uuid) -> Result<ResultView, ResultError> {
        let submission = self.load_submission(submission_id).await?;
        let challenge = self.load_challenge_for(&submission).await?;
        Ok(ResultView::project(submission, challenge))
    }

    async fn load_submission(&self, id: Uuid) -> Result<Submission, ResultError> {
        self.submissions.get(id).await.map_err(|err| match err {
            ApiError::NotFound(_) => ResultError::SubmissionNotFound,
            other => stage_failure("submission", id, other),
        })
    }

    async fn load_challenge_for(&self, submission: &Submission) -> Result<Challenge, ResultError> {
        self.challenges.get(submission.challenge_id).await.map_err(|err| match err {
            ApiError::NotFound(_) => ResultError::ChallengeNotFound,
            other => stage_failure("challenge", submission.challenge_id, other),
        })
    }
}

fn stage_failure(stage: &str, id: Uuid, err: ApiError) -> ResultError {
    tracing::warn!(stage, %id, error = %err, "Result load failed");
    ResultError::Failed(format!("Failed to load {stage}"))
}
