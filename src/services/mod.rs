pub(crate) mod auth;
pub(crate) mod challenges;
pub(crate) mod submissions;

pub(crate) use auth::AuthService;
pub(crate) use challenges::ChallengeService;
pub(crate) use submissions::SubmissionService;
