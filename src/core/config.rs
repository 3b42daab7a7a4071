use std::{env, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    api: ApiSettings,
    auth: AuthSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) base_url: String,
    pub(crate) request_timeout_seconds: u64,
    pub(crate) connect_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct AuthSettings {
    pub(crate) token_path: PathBuf,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let base_url = env_or_default("CODECRAFT_API_URL", "http://localhost:8000/api/v1");
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let request_timeout_seconds = parse_u64(
            "CODECRAFT_REQUEST_TIMEOUT",
            env_or_default("CODECRAFT_REQUEST_TIMEOUT", "90"),
        )?;
        let connect_timeout_seconds = parse_u64(
            "CODECRAFT_CONNECT_TIMEOUT",
            env_or_default("CODECRAFT_CONNECT_TIMEOUT", "10"),
        )?;

        let token_path = env_optional("CODECRAFT_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_token_path);

        let log_level = env_or_default("CODECRAFT_LOG_LEVEL", "warn");
        let json =
            env_optional("CODECRAFT_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        Ok(Self {
            api: ApiSettings {
                base_url: base_url.trim_end_matches('/').to_string(),
                request_timeout_seconds,
                connect_timeout_seconds,
            },
            auth: AuthSettings { token_path },
            telemetry: TelemetrySettings { log_level, json },
        })
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn auth(&self) -> &AuthSettings {
        &self.auth
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }
}

fn default_token_path() -> PathBuf {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join(".codecraft").join("token"),
        _ => PathBuf::from(".codecraft-token"),
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}
