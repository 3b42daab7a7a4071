use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

use crate::cli::render;
use crate::services::{ChallengeService, SubmissionService};
use crate::workflow::form::SubmissionDraft;
use crate::workflow::result::ResultFlow;
use crate::workflow::submit::{SubmitFlow, SubmitState};

pub(crate) struct SubmitArgs {
    pub(crate) challenge_id: Uuid,
    pub(crate) code: Option<String>,
    pub(crate) code_file: Option<PathBuf>,
    pub(crate) explanation: Option<String>,
    pub(crate) explanation_file: Option<PathBuf>,
}

/// Drives the submit workflow end to end: load the challenge, validate the
/// draft, create the submission, then render the graded result.
pub(crate) async fn submit(
    challenges: ChallengeService,
    submissions: SubmissionService,
    args: SubmitArgs,
) -> Result<()> {
    let draft = SubmissionDraft {
        code: read_input(args.code, args.code_file, "code")?,
        explanation: read_input(args.explanation, args.explanation_file, "explanation")?,
    };

    let mut flow = SubmitFlow::new(challenges.clone(), submissions.clone());
    match flow.load_challenge(args.challenge_id).await {
        SubmitState::FormReady { challenge, .. } => {
            println!("Submit: {}", challenge.title);
            println!("Submitting for AI grading, this may take a few seconds...");
        }
        SubmitState::LoadError(message) => return Err(anyhow!(message.clone())),
        other => return Err(anyhow!("unexpected load state: {other:?}")),
    }
    flow.set_draft(draft);

    let submission_id = match flow.submit().await {
        SubmitState::Submitted { submission } => submission.id,
        SubmitState::FormReady { error: Some(error), .. } => {
            return Err(anyhow!(error.message().to_string()))
        }
        other => return Err(anyhow!("unexpected submit state: {other:?}")),
    };

    let view = ResultFlow::new(challenges, submissions)
        .load(submission_id)
        .await
        .map_err(|err| anyhow!(err.message().to_string()))?;
    print!("{}", render::render_result(&view));
    Ok(())
}

pub(crate) async fn history(submissions: &SubmissionService) -> Result<()> {
    let listed = submissions.list().await?;
    print!("{}", render::render_submission_history(&listed));
    Ok(())
}

pub(crate) async fn result(
    challenges: ChallengeService,
    submissions: SubmissionService,
    id: Uuid,
) -> Result<()> {
    let view = ResultFlow::new(challenges, submissions)
        .load(id)
        .await
        .map_err(|err| anyhow!("{}. Browse challenges with `codecraft challenges`.", err.message()))?;
    print!("{}", render::render_result(&view));
    Ok(())
}

fn read_input(
    inline: Option<String>,
    file: Option<PathBuf>,
    field: &'static str,
) -> Result<String> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(anyhow!("pass either --{field} or --{field}-file, not both")),
        (Some(text), None) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {field} file {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}
