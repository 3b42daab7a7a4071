use serde_json::Value;
use thiserror::Error;

/// Failure taxonomy for backend calls. Local form validation has its own
/// error type in `workflow::form` and never reaches this layer.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("not authenticated: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{detail}")]
    Backend { status: u16, detail: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    pub(crate) fn from_status(status: u16, body: &Value) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| "unknown_error".to_string());
        match status {
            401 => ApiError::Unauthorized(detail),
            404 => ApiError::NotFound(detail),
            _ => ApiError::Backend { status, detail },
        }
    }

    /// Backend-provided detail message, when one exists.
    pub(crate) fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(detail) | ApiError::NotFound(detail) => Some(detail),
            ApiError::Backend { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// FastAPI-style `detail` extraction: either a plain string or a list of
/// validation items carrying `msg`/`message`.
fn extract_detail(payload: &Value) -> Option<String> {
    if let Some(detail) = payload.get("detail") {
        if let Some(text) = detail.as_str() {
            return Some(text.to_string());
        }
        if let Some(items) = detail.as_array() {
            let joined = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .or_else(|| item.get("message").and_then(Value::as_str))
                })
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
    }

    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .map(ToString::to_string)
}
