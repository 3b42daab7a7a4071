use anyhow::Result;
use uuid::Uuid;

use crate::cli::render;
use crate::schemas::{Challenge, ChallengeCategory, ChallengeDifficulty};
use crate::services::ChallengeService;

pub(crate) async fn list(
    challenges: &ChallengeService,
    category: Option<ChallengeCategory>,
    difficulty: Option<ChallengeDifficulty>,
    search: Option<String>,
) -> Result<()> {
    let mut listed = challenges.list(category, difficulty).await?;
    if let Some(needle) = search {
        listed = filter_by_substring(listed, &needle);
    }
    print!("{}", render::render_challenge_list(&listed));
    Ok(())
}

pub(crate) async fn show(challenges: &ChallengeService, id: Uuid) -> Result<()> {
    let challenge = challenges.get(id).await?;
    print!("{}", render::render_challenge_detail(&challenge));
    Ok(())
}

/// Case-insensitive substring match over title and description, applied
/// client-side on top of the server-side filters.
fn filter_by_substring(challenges: Vec<Challenge>, needle: &str) -> Vec<Challenge> {
    let needle = needle.to_lowercase();
    challenges
        .into_iter()
        .filter(|challenge| {
            challenge.title.to_lowercase().contains(&needle)
                || challenge.description.to_lowercase().contains(&needle)
        })
        .collect()
}
