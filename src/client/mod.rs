pub(crate) mod errors;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::config::Settings;
use crate::core::credentials::AuthContext;
use errors::ApiError;

/// Thin adapter over the backend REST surface: joins paths onto the base URL,
/// attaches the bearer token read from the auth context at request time, and
/// maps failures into [`ApiError`].
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    http: Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    pub(crate) fn from_settings(settings: &Settings, auth: AuthContext) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(settings.api().connect_timeout_seconds))
            .timeout(Duration::from_secs(settings.api().request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: settings.api().base_url.trim_end_matches('/').to_string(), auth })
    }

    /// Client pointed at an arbitrary base URL; used by the test backend.
    #[cfg(test)]
    pub(crate) fn for_base_url(base_url: &str, auth: AuthContext) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), auth })
    }

    pub(crate) fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(path, request).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(path, self.http.post(self.url(path)).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        mut request: RequestBuilder,
    ) -> Result<T, ApiError> {
        if let Ok(Some(token)) = self.auth.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(|err| ApiError::Decode(err.to_string()));
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::debug!(path, status = status.as_u16(), error = %err, "Backend request failed");
        Err(err)
    }
}
