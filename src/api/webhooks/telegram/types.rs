//! Telegram webhook types

use serde::{Deserialize, Serialize};

use crate::bot::InboundUpdate;

/// Telegram Update object (simplified)
#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
    pub callback_query: Option<TelegramCallbackQuery>,
}

/// Callback query from an inline keyboard button press
#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramCallbackQuery {
    pub id: String,
    pub from: Option<TelegramUser>,
    pub message: Option<TelegramMessage>,
    pub data: Option<String>,
}

/// Telegram Message object (simplified)
#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: TelegramChat,
    pub from: Option<TelegramUser>,
    pub text: Option<String>,
    pub caption: Option<String>,
}

/// Telegram Chat object
#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: String,
}

/// Telegram User object
#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
}

impl TelegramUpdate {
    /// Convert to a channel-independent update
    ///
    /// Returns `None` for updates the bot does not act on: other update
    /// kinds, bot authors, and callbacks whose message (and so chat) is gone.
    #[must_use]
    pub fn into_inbound(self) -> Option<InboundUpdate> {
        if let Some(callback) = self.callback_query {
            let chat_id = callback.message?.chat.id;
            let data = callback.data.unwrap_or_default();
            return Some(InboundUpdate::callback(chat_id, callback.id, &data));
        }

        let message = self.message?;
        if message.from.as_ref().is_some_and(|u| u.is_bot) {
            return None;
        }

        let text = message.text.or(message.caption).unwrap_or_default();
        Some(InboundUpdate::message(message.chat.id, &text))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::conversation::{CallbackAction, Input};

    fn parse(value: serde_json::Value) -> TelegramUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_message_becomes_input() {
        let update = parse(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "date": 0,
                "chat": {"id": 42, "type": "private"},
                "from": {"id": 42, "is_bot": false, "first_name": "Rami"},
                "text": "/start t1"
            }
        }));

        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.chat_id, 42);
        assert!(inbound.input.start().is_some());
        assert!(inbound.callback_id.is_none());
    }

    #[test]
    fn callback_uses_message_chat() {
        let update = parse(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Rami"},
                "message": {"message_id": 11, "chat": {"id": 42, "type": "private"}},
                "data": "ADD:kofta"
            }
        }));

        let inbound = update.into_inbound().unwrap();
        assert_eq!(inbound.callback_id.as_deref(), Some("cb-1"));
        assert_eq!(
            inbound.input,
            Input::Callback(CallbackAction::AddItem("kofta".to_string()))
        );
    }

    #[test]
    fn media_without_text_is_empty_text() {
        let update = parse(json!({
            "update_id": 3,
            "message": {"message_id": 12, "chat": {"id": 7}, "photo": []}
        }));
        assert_eq!(update.into_inbound().unwrap().input, Input::Text(String::new()));
    }

    #[test]
    fn ignored_updates() {
        let edited = parse(json!({"update_id": 4, "edited_message": {}}));
        assert!(edited.into_inbound().is_none());

        let from_bot = parse(json!({
            "update_id": 5,
            "message": {"message_id": 1, "chat": {"id": 7}, "from": {"id": 9, "is_bot": true}, "text": "hi"}
        }));
        assert!(from_bot.into_inbound().is_none());

        let orphan_callback = parse(json!({
            "update_id": 6,
            "callback_query": {"id": "cb", "data": "CART:CLEAR"}
        }));
        assert!(orphan_callback.into_inbound().is_none());
    }
}
