//! Restaurant search host binary.
//!
//! Loads the TOML config from the first command-line argument, else
//! `$CUISINE_ATLAS_CONFIG`, else the default location, and serves the
//! search API until the listener fails.

use std::path::PathBuf;

use cuisine_atlas::HostConfig;
use cuisine_atlas::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(HostConfig::config_path, PathBuf::from);

    let config = HostConfig::load_or_default(&config_path).map_err(|e| {
        tracing::error!(path = %config_path.display(), error = %e, "failed to load config");
        anyhow::anyhow!("cuisine-host config error: {e}")
    })?;

    tracing::info!(addr = %config.bind_addr(), "cuisine-host starting");

    run_server(config).await.map_err(|e| {
        tracing::error!(error = %e, "cuisine-host exited with error");
        anyhow::anyhow!("cuisine-host failed: {e}")
    })?;

    tracing::info!("cuisine-host shut down cleanly");
    Ok(())
}
