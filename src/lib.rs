pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod core;
pub(crate) mod schemas;
pub(crate) mod services;
pub(crate) mod workflow;

#[cfg(test)]
mod test_support;

use crate::core::{config::Settings, telemetry};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;

    tracing::debug!(base_url = %settings.api().base_url, "CodeCraft client starting");

    cli::run(&settings).await
}
