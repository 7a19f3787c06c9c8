//! HTTP API server for the menu gateway

pub mod health;
pub mod webhooks;

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::bot::OrderBot;
use crate::channels::UpdateDedup;
use crate::config::Config;

/// Plain-text banner served at `/`
const BANNER: &str = "Menu gateway is running with dynamic tenant loading.";

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub bot: OrderBot,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`, if any
    pub telegram_webhook_secret: Option<String>,
    pub telegram_dedup: Arc<Mutex<UpdateDedup>>,
    pub whatsapp_verify_token: String,
}

impl ApiState {
    /// Build handler state from configuration
    #[must_use]
    pub fn new(bot: OrderBot, config: &Config) -> Self {
        Self {
            bot,
            telegram_webhook_secret: config.telegram.webhook_secret.clone(),
            telegram_dedup: Arc::new(Mutex::new(UpdateDedup::default())),
            whatsapp_verify_token: config.whatsapp.verify_token.clone(),
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    #[must_use]
    pub fn new(state: ApiState, port: u16) -> Self {
        Self {
            state: Arc::new(state),
            port,
        }
    }

    /// Build the router with all routes and layers
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(root))
            .merge(health::router())
            .merge(webhooks::router(Arc::clone(&self.state)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn root() -> &'static str {
    BANNER
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
