//! Telegram channel adapter
//!
//! Receives updates through the webhook route and sends through the Bot API.

mod api;
pub mod dedup;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;

use super::{Channel, OutgoingMessage};
use crate::Result;
use crate::render::Reply;

pub use dedup::UpdateDedup;

/// Upper bound for one Bot API call; the chat lock is held meanwhile
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram channel adapter
#[derive(Clone)]
pub struct TelegramChannel {
    token: SecretString,
    api_base: String,
    client: Client,
}

impl TelegramChannel {
    /// Create a new Telegram channel adapter
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        Self {
            token,
            api_base: types::API_BASE.to_string(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Point the adapter at another Bot API server (e.g. a self-hosted one)
    ///
    /// `api_base` is the prefix the token is appended to, such as
    /// `http://localhost:8081/bot`.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<()> {
        match &message.reply {
            Reply::Text { text, keyboard } => {
                self.send_message(message.chat_id, text, keyboard.as_ref())
                    .await
            }
            Reply::Photo {
                image_ref,
                caption,
                keyboard,
            } => {
                let caption = (!caption.is_empty()).then_some(caption.as_str());
                self.send_photo(message.chat_id, image_ref, caption, keyboard.as_ref())
                    .await
            }
        }
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.answer_callback_query(callback_id, None).await
    }
}
