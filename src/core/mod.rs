pub(crate) mod config;
pub(crate) mod credentials;
pub(crate) mod telemetry;
pub(crate) mod time;
