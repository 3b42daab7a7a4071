pub(crate) mod challenge;
pub(crate) mod submission;
pub(crate) mod user;

pub(crate) use challenge::{Challenge, ChallengeCategory, ChallengeDifficulty};
pub(crate) use submission::{Submission, SubmissionCreate};
pub(crate) use user::{Token, User, UserCreate, UserLogin};
