//! Webhook endpoints for channel integrations

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use super::ApiState;

pub mod telegram;
pub mod whatsapp;

/// Build webhooks router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/telegram-webhook", post(telegram::handle_update))
        .route(
            "/webhook",
            get(whatsapp::verify).post(whatsapp::handle_event),
        )
        .with_state(state)
}
