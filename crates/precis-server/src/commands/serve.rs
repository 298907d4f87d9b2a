//! `precis serve`

use std::path::Path;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use precis_server::{AppState, ConfigOverrides, load_config, load_summarizer, serve};

pub async fn run(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<()> {
    let mut config = load_config(config_path)?;
    overrides.apply(&mut config);
    config.validate()?;

    // A model that fails to load is fatal; nothing is served.
    let summarizer = load_summarizer(&config)?;
    let state = AppState::new(summarizer).with_request_timeout(config.request_timeout());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
