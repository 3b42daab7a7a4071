use anyhow::{anyhow, Context, Result};
use validator::Validate;

use crate::client::errors::ApiError;
use crate::client::ApiClient;
use crate::schemas::{Token, User, UserCreate, UserLogin};

#[derive(Debug, Clone)]
pub(crate) struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub(crate) async fn register(&self, payload: UserCreate) -> Result<User> {
        payload.validate().map_err(|errors| anyhow!(flatten_validation(&errors)))?;
        self.client.post("/auth/register", &payload).await.context("Registration failed")
    }

    /// Authenticates and persists the token so later requests carry it.
    pub(crate) async fn login(&self, credentials: UserLogin) -> Result<Token> {
        credentials.validate().map_err(|errors| anyhow!(flatten_validation(&errors)))?;

        let token: Token = self.client.post("/auth/login", &credentials).await.map_err(|err| {
            let detail = err.detail().map(ToString::to_string);
            match detail {
                Some(detail) => anyhow!(detail),
                None => anyhow!(err),
            }
        })?;
        self.client.auth().store_token(&token.access_token)?;

        tracing::info!(username = %credentials.username, "Logged in");
        Ok(token)
    }

    pub(crate) async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me", &[]).await
    }

    pub(crate) fn logout(&self) -> Result<()> {
        self.client.auth().clear_token()?;
        tracing::info!("Logged out");
        Ok(())
    }
}

fn flatten_validation(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("invalid value for {field}"),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
