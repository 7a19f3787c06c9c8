//! `WhatsApp` Cloud API webhook handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::ApiState;
use crate::channels::WhatsAppWebhook;
use crate::channels::whatsapp::verify_subscription;

/// `hub.*` query parameters of the subscription handshake
#[derive(Debug, Default, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Answer the subscription handshake
pub async fn verify(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match verify_subscription(
        params.mode.as_deref(),
        params.verify_token.as_deref(),
        params.challenge.as_deref(),
        &state.whatsapp_verify_token,
    ) {
        Some(challenge) => {
            tracing::info!("WhatsApp webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            tracing::warn!("WhatsApp webhook verification failed");
            (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "Verification failed"})),
            )
                .into_response()
        }
    }
}

/// Log inbound messages and acknowledge
pub async fn handle_event(body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<WhatsAppWebhook>(&body) {
        Ok(payload) => {
            for message in payload.text_messages() {
                tracing::info!(
                    from = %message.from,
                    message_id = %message.message_id,
                    text = %message.body,
                    "WhatsApp message received"
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "unparseable WhatsApp payload"),
    }

    Json(json!({"status": "received"}))
}
