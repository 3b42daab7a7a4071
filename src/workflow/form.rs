use thiserror::Error;
use uuid::Uuid;

use crate::schemas::{ChallengeCategory, SubmissionCreate};

/// Which input a category demands before a submission may leave the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequiredField {
    Code,
    Explanation,
    /// No dedicated branch exists for this category; at least one input is
    /// required so the grader has something to work with.
    Either,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Code,
    Explanation,
    Any,
}

/// Per-category form description. Adding a category is a table entry, not a
/// new code branch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FormSpec {
    pub(crate) required: RequiredField,
    pub(crate) input_label: &'static str,
    pub(crate) placeholder: &'static str,
    pub(crate) grading_criteria: &'static [&'static str],
}

const COMPREHENSION_FORM: FormSpec = FormSpec {
    required: RequiredField::Explanation,
    input_label: "Your Explanation",
    placeholder: "Explain what the code does, how it works, and any potential issues...",
    grading_criteria: &[
        "Accuracy: Technical correctness of your explanation",
        "Completeness: Covering all important aspects",
        "Clarity: How well you communicate your understanding",
        "Depth: Demonstrating deeper insights",
    ],
};

const DEBUGGING_FORM: FormSpec = FormSpec {
    required: RequiredField::Code,
    input_label: "Your Solution Code",
    placeholder: "Paste your fixed code here...",
    grading_criteria: &[
        "Bug identification: Finding the actual issues",
        "Correct fix: Properly resolving the problems",
        "Code quality: Clean and maintainable solution",
        "Explanation: Understanding why it was broken",
    ],
};

const REVIEW_FORM: FormSpec = FormSpec {
    required: RequiredField::Explanation,
    input_label: "Your Review",
    placeholder: "Identify security issues, bugs, and suggest improvements...",
    grading_criteria: &[
        "Issue identification: Finding all problems",
        "Severity assessment: Understanding impact",
        "Recommendations: Providing good solutions",
        "Best practices: Demonstrating security knowledge",
    ],
};

// The design category has no observed form branch or grading criteria; it is
// accepted with whichever input the user supplies.
const DESIGN_FORM: FormSpec = FormSpec {
    required: RequiredField::Either,
    input_label: "Your Answer",
    placeholder: "Describe your design, or sketch it in code...",
    grading_criteria: &[],
};

pub(crate) fn form_spec(category: ChallengeCategory) -> &'static FormSpec {
    match category {
        ChallengeCategory::Comprehension => &COMPREHENSION_FORM,
        ChallengeCategory::Debugging => &DEBUGGING_FORM,
        ChallengeCategory::Security | ChallengeCategory::AiReview => &REVIEW_FORM,
        ChallengeCategory::Design => &DESIGN_FORM,
    }
}

/// The user's in-progress answer. Kept as plain strings so a failed submit
/// leaves the draft intact for retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SubmissionDraft {
    pub(crate) code: String,
    pub(crate) explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct ValidationError {
    pub(crate) field: FormField,
    pub(crate) message: &'static str,
}

/// Local pre-submit check. A failure here never issues a network call.
pub(crate) fn validate(
    category: ChallengeCategory,
    draft: &SubmissionDraft,
) -> Result<(), ValidationError> {
    let has_code = !draft.code.trim().is_empty();
    let has_explanation = !draft.explanation.trim().is_empty();

    match form_spec(category).required {
        RequiredField::Code if !has_code => Err(ValidationError {
            field: FormField::Code,
            message: "Please provide your code solution",
        }),
        RequiredField::Explanation if !has_explanation => Err(ValidationError {
            field: FormField::Explanation,
            message: "Please provide your explanation/review",
        }),
        RequiredField::Either if !has_code && !has_explanation => Err(ValidationError {
            field: FormField::Any,
            message: "Please provide code or an explanation",
        }),
        _ => Ok(()),
    }
}

/// Projects a validated draft into the wire payload; blank inputs are sent as
/// absent, not as empty strings.
pub(crate) fn to_create(challenge_id: Uuid, draft: &SubmissionDraft) -> SubmissionCreate {
    let code = draft.code.trim();
    let explanation = draft.explanation.trim();
    SubmissionCreate {
        challenge_id,
        code: (!code.is_empty()).then(|| draft.code.clone()),
        explanation: (!explanation.is_empty()).then(|| draft.explanation.clone()),
    }
}
