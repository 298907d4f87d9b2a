//! HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use precis::CancellationToken;

use crate::state::AppState;
use crate::types::{ApiError, SummarizeRequest, SummarizeResponse};

pub const INDEX_MESSAGE: &str = "Summarization API is running.";

pub async fn index() -> &'static str {
    INDEX_MESSAGE
}

/// Summarize the `text` field of a JSON body.
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let text = match payload {
        Ok(Json(request)) => request.text.unwrap_or_default(),
        Err(rejection) => {
            log::debug!("Rejected summarize body: {}", rejection);
            return Err(ApiError::NoText);
        }
    };
    if text.trim().is_empty() {
        return Err(ApiError::NoText);
    }

    let (token, handle) = match state.request_timeout {
        Some(timeout) => CancellationToken::with_timeout(timeout),
        None => CancellationToken::new(),
    };
    // Stops decoding if the client goes away before we answer.
    let guard = handle.cancel_on_drop();

    let summarizer = state.summarizer.clone();
    let chars = text.len();
    let result = tokio::task::spawn_blocking(move || {
        summarizer.summarize_with_cancellation(&text, &token)
    })
    .await;
    guard.disarm();

    match result {
        Ok(Ok(summary)) => {
            log::info!("Summarized {} chars into {} chars", chars, summary.len());
            Ok(Json(SummarizeResponse { summary }))
        }
        Ok(Err(e)) => {
            log::error!("Error during summarization: {}", e);
            Err(ApiError::Internal)
        }
        Err(e) => {
            log::error!("Summarization task failed: {}", e);
            Err(ApiError::Internal)
        }
    }
}
