use anyhow::{Context, Result};
use clap::Parser;
use goalboard::{config::ServerConfig, server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::parse();
    telemetry::init_tracing(config.log_json);

    let storage = server::open_storage(&config)
        .await
        .context("Failed to open storage")?;

    server::start_server(&config, storage).await
}
