use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: Uuid,
    pub(crate) username: String,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) full_name: Option<String>,
    #[serde(default)]
    pub(crate) skill_level: i32,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    #[serde(with = "crate::core::time::timestamp")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub(crate) struct UserCreate {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub(crate) username: String,
    #[validate(email(message = "invalid email address"))]
    pub(crate) email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub(crate) password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub(crate) struct UserLogin {
    #[validate(length(min = 1, message = "username is required"))]
    pub(crate) username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub(crate) password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Token {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
}
