//! Webhook route handlers
//!
//! The batch contract: every event in the array gets attempted. Undecodable
//! or unrecognizable events are skipped, failed deliveries are isolated per
//! recipient, and the response is 200 once the batch has run its course.
//! Only a body that is not a JSON array fails the request itself.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

use crate::errors::SwapwatchError;
use crate::logger::{self, LogTag};
use crate::swaps::parser::decode_batch;
use crate::swaps::types::{InboundTransactionEvent, ParsedSwap};
use crate::telegram::formatters::format_swap_message;
use crate::telegram::notifier::dispatch_swap_notification;
use crate::webserver::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness probe
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        concat!("swapwatch ", env!("CARGO_PKG_VERSION")),
    )
}

/// Ingest one transaction batch from the webhook provider
///
/// The body is parsed by hand so a broken payload maps to 500 (nothing was
/// attempted) instead of an extractor rejection.
async fn handle_webhook(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    let payload: Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            logger::warning(LogTag::Webhook, &format!("Undecodable webhook body: {}", e));
            return (StatusCode::INTERNAL_SERVER_ERROR, "invalid JSON body");
        }
    };

    let Some(events) = payload.as_array() else {
        logger::warning(LogTag::Webhook, "Rejected non-array webhook body");
        return (StatusCode::INTERNAL_SERVER_ERROR, "expected a JSON array");
    };

    logger::debug(
        LogTag::Webhook,
        &format!("Received batch of {} events", events.len()),
    );

    for (event, swap) in decode_batch(events) {
        notify_subscribers(&state, &event, &swap).await;
    }

    (StatusCode::OK, "OK")
}

/// Compose and dispatch the notification for one parsed swap
async fn notify_subscribers(state: &AppState, event: &InboundTransactionEvent, swap: &ParsedSwap) {
    let market = match swap.enrichment_target() {
        Some(mint) => state.market.fetch_market_data(mint).await.unwrap_or_else(|e| {
            let failure = SwapwatchError::Upstream {
                service: "DexScreener".to_string(),
                message: e,
            };
            logger::warning(LogTag::Market, &format!("{}", failure));
            None
        }),
        None => None,
    };

    let message = format_swap_message(swap, market.as_ref(), &event.signature, event.timestamp);
    dispatch_swap_notification(&state.bot, &state.db, &swap.trader, &message).await;
}
