//! Messaging channel adapters
//!
//! Each outbound channel implements the `Channel` trait so the bot can
//! deliver replies without knowing the transport.

mod telegram;
pub mod whatsapp;

use async_trait::async_trait;

pub use telegram::{TelegramChannel, UpdateDedup};
pub use whatsapp::WhatsAppWebhook;

use crate::Result;
use crate::render::Reply;
use crate::store::ChatId;

/// A reply addressed to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: ChatId,
    pub reply: Reply,
}

impl OutgoingMessage {
    #[must_use]
    pub const fn new(chat_id: ChatId, reply: Reply) -> Self {
        Self { chat_id, reply }
    }
}

/// Trait for messaging channel adapters
#[async_trait]
pub trait Channel: Send + Sync {
    /// Get the channel name
    fn name(&self) -> &'static str;

    /// Send a message
    async fn send(&self, message: &OutgoingMessage) -> Result<()>;

    /// Acknowledge a button press
    ///
    /// Default implementation is a no-op for channels without callbacks
    async fn answer_callback(&self, _callback_id: &str) -> Result<()> {
        Ok(())
    }
}
