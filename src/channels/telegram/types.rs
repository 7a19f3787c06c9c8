//! Telegram Bot API request/response types

use serde::{Deserialize, Serialize};

use crate::render::Keyboard;

/// Telegram Bot API base URL
pub(crate) const API_BASE: &str = "https://api.telegram.org/bot";

/// HTML parse mode
pub(crate) const PARSE_MODE_HTML: &str = "HTML";

/// Inline keyboard markup for message buttons
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A button in an inline keyboard row
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Custom reply keyboard shown in place of the system keyboard
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

/// A reply keyboard button; pressing it sends its text
#[derive(Debug, Clone, Serialize)]
pub(crate) struct KeyboardButton {
    pub text: String,
}

/// Any `reply_markup` value
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum ReplyMarkup {
    Inline(InlineKeyboardMarkup),
    Reply(ReplyKeyboardMarkup),
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        match keyboard {
            Keyboard::Inline(rows) => Self::Inline(InlineKeyboardMarkup {
                inline_keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|b| InlineKeyboardButton {
                                text: b.text.clone(),
                                callback_data: b.action.to_string(),
                            })
                            .collect()
                    })
                    .collect(),
            }),
            Keyboard::Reply(rows) => Self::Reply(ReplyKeyboardMarkup {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|text| KeyboardButton { text: text.clone() })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
            }),
        }
    }
}

/// Telegram sendMessage request
#[derive(Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<&'a ReplyMarkup>,
}

/// Telegram sendPhoto request
#[derive(Serialize)]
pub(crate) struct SendPhotoRequest<'a> {
    pub chat_id: i64,
    /// Photo URL or file id
    pub photo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<&'a ReplyMarkup>,
}

/// Telegram setWebhook request
#[derive(Serialize)]
pub(crate) struct SetWebhookRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

/// Telegram answerCallbackQuery request
#[derive(Serialize)]
pub(crate) struct AnswerCallbackQueryRequest {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Telegram API response wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct TelegramResponse {
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::conversation::CallbackAction;
    use crate::render::{self, InlineButton};

    #[test]
    fn inline_keyboard_serializes_callback_data() {
        let keyboard = Keyboard::Inline(vec![vec![InlineButton::new(
            "Grill",
            CallbackAction::SelectCategory("grill".to_string()),
        )]]);

        let value = serde_json::to_value(ReplyMarkup::from(&keyboard)).unwrap();
        assert_eq!(
            value,
            json!({"inline_keyboard": [[{"text": "Grill", "callback_data": "CAT:grill"}]]})
        );
    }

    #[test]
    fn reply_keyboard_is_resized() {
        let value = serde_json::to_value(ReplyMarkup::from(&render::main_keyboard())).unwrap();
        assert_eq!(value["resize_keyboard"], json!(true));
        assert_eq!(value["keyboard"].as_array().unwrap().len(), 2);
        assert!(value["keyboard"][0][0]["text"].is_string());
    }

    #[test]
    fn message_request_omits_empty_fields() {
        let request = SendMessageRequest {
            chat_id: 5,
            text: "hi",
            parse_mode: None,
            reply_markup: None,
        };
        assert_eq!(serde_json::to_value(request).unwrap(), json!({"chat_id": 5, "text": "hi"}));
    }
}
