use uuid::Uuid;

use crate::client::errors::ApiError;
use crate::schemas::{Challenge, Submission};
use crate::services::{ChallengeService, SubmissionService};
use crate::workflow::form::{self, SubmissionDraft, ValidationError};

const GENERIC_SUBMIT_FAILURE: &str = "Submission failed. Please try again.";

/// Error slot rendered above the form. Validation errors never touched the
/// network; submit errors carry the backend detail when one was provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormError {
    Validation(ValidationError),
    Submit(String),
}

impl FormError {
    pub(crate) fn message(&self) -> &str {
        match self {
            FormError::Validation(err) => err.message,
            FormError::Submit(message) => message,
        }
    }
}

/// Per-attempt state machine. Terminal states are `LoadError` and
/// `Submitted`; a failed submit returns to `FormReady` with the draft intact.
#[derive(Debug)]
pub(crate) enum SubmitState {
    Idle,
    LoadingChallenge,
    FormReady { challenge: Challenge, draft: SubmissionDraft, error: Option<FormError> },
    LoadError(String),
    Submitting { challenge: Challenge, draft: SubmissionDraft },
    Submitted { submission: Submission },
}

impl SubmitState {
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, SubmitState::LoadError(_) | SubmitState::Submitted { .. })
    }
}

pub(crate) struct SubmitFlow {
    challenges: ChallengeService,
    submissions: SubmissionService,
    state: SubmitState,
}

impl SubmitFlow {
    pub(crate) fn new(challenges: ChallengeService, submissions: SubmissionService) -> Self {
        Self { challenges, submissions, state: SubmitState::Idle }
    }

    pub(crate) fn state(&self) -> &SubmitState {
        &self.state
    }

    /// `idle → loading-challenge → {form-ready | load-error}`.
    pub(crate) async fn load_challenge(&mut self, id: Uuid) -> &SubmitState {
        self.state = SubmitState::LoadingChallenge;
        self.state = match self.challenges.get(id).await {
            Ok(challenge) => SubmitState::FormReady {
                challenge,
                draft: SubmissionDraft::default(),
                error: None,
            },
            Err(ApiError::NotFound(_)) => SubmitState::LoadError("Challenge not found".to_string()),
            Err(err) => {
                tracing::warn!(challenge_id = %id, error = %err, "Failed to load challenge");
                SubmitState::LoadError("Failed to load challenge".to_string())
            }
        };
        &self.state
    }

    /// Replaces the draft while the form is ready; clears any stale error.
    pub(crate) fn set_draft(&mut self, draft: SubmissionDraft) {
        if let SubmitState::FormReady { draft: current, error, .. } = &mut self.state {
            *current = draft;
            *error = None;
        }
    }

    /// `form-ready → validating → {validation-error | submitting}` and
    /// `submitting → {submit-error | submitted}`. Only legal from
    /// `FormReady`; any other state is left untouched.
    pub(crate) async fn submit(&mut self) -> &SubmitState {
        let (challenge, draft) = match &self.state {
            SubmitState::FormReady { challenge, draft, .. } => {
                (challenge.clone(), draft.clone())
            }
            _ => return &self.state,
        };

        if let Err(err) = form::validate(challenge.category, &draft) {
            self.state = SubmitState::FormReady {
                challenge,
                draft,
                error: Some(FormError::Validation(err)),
            };
            return &self.state;
        }

        let payload = form::to_create(challenge.id, &draft);
        self.state = SubmitState::Submitting { challenge, draft };

        let created = self.submissions.create(payload).await;
        let (challenge, draft) = match std::mem::replace(&mut self.state, SubmitState::Idle) {
            SubmitState::Submitting { challenge, draft } => (challenge, draft),
            other => {
                self.state = other;
                return &self.state;
            }
        };

        match created {
            Ok(submission) => {
                tracing::info!(submission_id = %submission.id, "Submission created");
                self.state = SubmitState::Submitted { submission };
            }
            Err(err) => {
                let message = err
                    .detail()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
                self.state = SubmitState::FormReady {
                    challenge,
                    draft,
                    error: Some(FormError::Submit(message)),
                };
            }
        }
        &self.state
    }
}
