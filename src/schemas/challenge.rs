use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub(crate) enum ChallengeCategory {
    Comprehension,
    Debugging,
    Security,
    AiReview,
    Design,
}

impl ChallengeCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ChallengeCategory::Comprehension => "comprehension",
            ChallengeCategory::Debugging => "debugging",
            ChallengeCategory::Security => "security",
            ChallengeCategory::AiReview => "ai_review",
            ChallengeCategory::Design => "design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub(crate) enum ChallengeDifficulty {
    Easy,
    Medium,
    Hard,
}

impl ChallengeDifficulty {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ChallengeDifficulty::Easy => "easy",
            ChallengeDifficulty::Medium => "medium",
            ChallengeDifficulty::Hard => "hard",
        }
    }
}

/// A graded exercise. Read-only from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Challenge {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: ChallengeCategory,
    pub(crate) difficulty: ChallengeDifficulty,
    #[serde(default)]
    pub(crate) code_snippet: Option<String>,
    #[serde(default)]
    pub(crate) language: Option<String>,
    pub(crate) time_limit: u32,
    pub(crate) points: u32,
    #[serde(default = "default_true")]
    pub(crate) is_active: bool,
    #[serde(with = "crate::core::time::timestamp")]
    pub(crate) created_at: OffsetDateTime,
}

fn default_true() -> bool {
    true
}
