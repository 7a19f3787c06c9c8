//! Telegram webhook handler

pub mod types;

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::Serialize;

use self::types::TelegramUpdate;
use crate::api::ApiState;

/// Header carrying the secret registered with `setWebhook`
const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Telegram webhook response
#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
}

fn ok() -> (StatusCode, Json<WebhookResponse>) {
    (StatusCode::OK, Json(WebhookResponse { ok: true }))
}

/// Handle incoming Telegram update
///
/// Returns 200 immediately and processes the update in a background task.
/// Malformed or irrelevant updates are still acknowledged so Telegram does
/// not redeliver them.
pub async fn handle_update(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    // Validate webhook secret token if configured
    if let Some(expected) = state.telegram_webhook_secret.as_deref() {
        let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());

        if provided != Some(expected) {
            tracing::warn!("Telegram webhook secret mismatch");
            return (StatusCode::FORBIDDEN, Json(WebhookResponse { ok: false }));
        }
    }

    let update: TelegramUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable Telegram update");
            return ok();
        }
    };

    let update_id = update.update_id;
    tracing::debug!(update_id, "received Telegram update");

    // Telegram redelivers on timeouts
    {
        let mut dedup = state
            .telegram_dedup
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if dedup.is_duplicate(update_id) {
            tracing::debug!(update_id, "duplicate Telegram update, skipping");
            return ok();
        }
    }

    let Some(inbound) = update.into_inbound() else {
        tracing::debug!(update_id, "ignoring Telegram update without a chat");
        return ok();
    };

    // Spawn processing in background so we return 200 immediately
    let bot = state.bot.clone();
    tokio::spawn(async move {
        bot.handle(inbound).await;
    });

    ok()
}
