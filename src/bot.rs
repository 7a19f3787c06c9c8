//! Update orchestration
//!
//! One inbound update runs: chat lock, tenant resolution, state machine,
//! then ordered delivery. The chat lock is held until the last reply is
//! sent so a chat's messages never interleave.

use std::sync::Arc;

use crate::channels::{Channel, OutgoingMessage};
use crate::conversation::{self, Input};
use crate::render::Reply;
use crate::session::SessionStore;
use crate::store::ChatId;
use crate::tenant::{Resolution, TenantResolver};

/// A channel-independent inbound update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub chat_id: ChatId,
    pub input: Input,
    /// Set for button presses that need acknowledging
    pub callback_id: Option<String>,
}

impl InboundUpdate {
    /// A text message
    #[must_use]
    pub fn message(chat_id: ChatId, text: &str) -> Self {
        Self {
            chat_id,
            input: Input::from_text(text),
            callback_id: None,
        }
    }

    /// An inline button press
    #[must_use]
    pub fn callback(chat_id: ChatId, callback_id: impl Into<String>, data: &str) -> Self {
        Self {
            chat_id,
            input: Input::from_callback(data),
            callback_id: Some(callback_id.into()),
        }
    }
}

/// Restaurant ordering bot
#[derive(Clone)]
pub struct OrderBot {
    resolver: TenantResolver,
    sessions: SessionStore,
    channel: Arc<dyn Channel>,
}

impl OrderBot {
    #[must_use]
    pub fn new(resolver: TenantResolver, sessions: SessionStore, channel: Arc<dyn Channel>) -> Self {
        Self {
            resolver,
            sessions,
            channel,
        }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub const fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    /// Process one update to completion
    ///
    /// Never fails: every problem ends as a message to the chat or a log line.
    pub async fn handle(&self, update: InboundUpdate) {
        let chat_id = update.chat_id;

        // Queue behind earlier updates before any network round trip
        let mut lock = self.sessions.lock(chat_id).await;

        if let Some(callback_id) = &update.callback_id
            && let Err(e) = self.channel.answer_callback(callback_id).await
        {
            tracing::debug!(chat_id, error = %e, "failed to answer callback query");
        }

        let replies = match self.resolver.resolve(chat_id, update.input.start()).await {
            Resolution::Rejected(rejection) => {
                tracing::info!(chat_id, ?rejection, "update not tied to a tenant");
                vec![Reply::text(rejection.message())]
            }
            Resolution::Resolved(ctx) => {
                let session = lock.session();
                let replies = conversation::handle(&ctx, session, &update.input);
                tracing::debug!(
                    chat_id,
                    tenant_id = %ctx.tenant_id,
                    state = ?session.state,
                    replies = replies.len(),
                    "update handled"
                );
                replies
            }
        };

        self.deliver(chat_id, replies).await;
    }

    async fn deliver(&self, chat_id: ChatId, replies: Vec<Reply>) {
        for reply in replies {
            let message = OutgoingMessage::new(chat_id, reply);
            if let Err(e) = self.channel.send(&message).await {
                tracing::warn!(
                    chat_id,
                    channel = self.channel.name(),
                    error = %e,
                    "failed to deliver reply"
                );
            }
        }
    }
}
