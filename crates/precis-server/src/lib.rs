//! HTTP service and command line front end for precis.
//!
//! Routes:
//! - `GET /` - liveness string
//! - `POST /summarize` - `{"text": "..."}` in, `{"summary": "..."}` out

use std::future::Future;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use precis::{ModelBundle, Summarizer, SummarizerBuilder};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod cli;
pub mod config;
pub mod handlers;
pub mod state;
pub mod types;

pub use cli::{Cli, Commands};
pub use config::{ConfigOverrides, ServerConfig, load_config, load_config_from_path};
pub use state::AppState;
pub use types::{ApiError, ErrorResponse, SummarizeRequest, SummarizeResponse};

/// Build the application router.
///
/// Only `/summarize` answers cross-origin requests.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/summarize", post(handlers::summarize))
        .layer(cors)
        .route("/", get(handlers::index))
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

/// Load the model directory named by `config` and build a summarizer.
pub fn load_summarizer(config: &ServerConfig) -> Result<Summarizer> {
    let bundle = ModelBundle::load(&config.model.dir, &config.load_options())
        .with_context(|| format!("failed to load model from {}", config.model.dir.display()))?;

    let summarizer = SummarizerBuilder::from_bundle(bundle)
        .prompt_prefix(config.generation.prompt_prefix.clone())
        .min_length(config.generation.min_length)
        .max_length(config.generation.max_length)
        .build()?;

    log::info!("Summarizer ready: {:?}", summarizer);
    Ok(summarizer)
}

#[cfg(test)]
mod tests;
