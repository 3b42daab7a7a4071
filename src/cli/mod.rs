mod auth;
mod challenges;
mod render;
mod submissions;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::core::config::Settings;
use crate::core::credentials::AuthContext;
use crate::schemas::{ChallengeCategory, ChallengeDifficulty};
use crate::services::{AuthService, ChallengeService, SubmissionService};
use submissions::SubmitArgs;

#[derive(Parser, Debug)]
#[command(name = "codecraft", version, about = "CodeCraft coding-challenge client")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Authenticate and persist the access token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted access token
    Logout,
    /// Show the currently authenticated user
    Whoami,
    /// Browse challenges
    Challenges {
        #[arg(long, value_enum)]
        category: Option<ChallengeCategory>,
        #[arg(long, value_enum)]
        difficulty: Option<ChallengeDifficulty>,
        /// Substring match over title and description, applied client-side
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one challenge with its required input and grading criteria
    Challenge { id: Uuid },
    /// Submit an answer for AI grading and render the result
    Submit {
        id: Uuid,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        code_file: Option<PathBuf>,
        #[arg(long)]
        explanation: Option<String>,
        #[arg(long)]
        explanation_file: Option<PathBuf>,
    },
    /// List your submission history
    Submissions,
    /// Render the graded result for a submission
    Result { id: Uuid },
}

pub(crate) async fn run(settings: &Settings) -> Result<()> {
    let cli = Cli::parse();

    let auth_context = AuthContext::from_settings(settings);
    let client = ApiClient::from_settings(settings, auth_context.clone())?;
    let auth = AuthService::new(client.clone());
    let challenges = ChallengeService::new(client.clone());
    let submissions = SubmissionService::new(client);

    match cli.command {
        Command::Register { username, email, password, full_name } => {
            auth::register(&auth, username, email, password, full_name).await
        }
        Command::Login { username, password } => auth::login(&auth, username, password).await,
        Command::Logout => auth::logout(&auth),
        Command::Whoami => {
            require_login(&auth_context)?;
            auth::whoami(&auth).await
        }
        Command::Challenges { category, difficulty, search } => {
            require_login(&auth_context)?;
            challenges::list(&challenges, category, difficulty, search).await
        }
        Command::Challenge { id } => {
            require_login(&auth_context)?;
            challenges::show(&challenges, id).await
        }
        Command::Submit { id, code, code_file, explanation, explanation_file } => {
            require_login(&auth_context)?;
            submissions::submit(
                challenges,
                submissions,
                SubmitArgs { challenge_id: id, code, code_file, explanation, explanation_file },
            )
            .await
        }
        Command::Submissions => {
            require_login(&auth_context)?;
            submissions::history(&submissions).await
        }
        Command::Result { id } => {
            require_login(&auth_context)?;
            submissions::result(challenges, submissions, id).await
        }
    }
}

/// Route-level gate: commands that need a token fail before any request is
/// issued when none is stored.
fn require_login(auth: &AuthContext) -> Result<()> {
    if !auth.is_authenticated() {
        bail!("Not logged in. Run `codecraft login` first.");
    }
    Ok(())
}
