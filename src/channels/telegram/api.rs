//! Raw Telegram Bot API calls

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::types::{
    AnswerCallbackQueryRequest, PARSE_MODE_HTML, ReplyMarkup, SendMessageRequest,
    SendPhotoRequest, SetWebhookRequest, TelegramResponse,
};
use crate::render::Keyboard;
use crate::{Error, Result};

/// Result of a request Telegram answered
enum Outcome {
    Accepted,
    Rejected { status: StatusCode, description: String },
}

impl Outcome {
    fn into_result(self, method: &str) -> Result<()> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected {
                status,
                description,
            } => Err(Error::Channel(format!(
                "Telegram {method} error: {status} - {description}"
            ))),
        }
    }
}

/// Whether an API error means the chat can no longer be reached
fn is_unreachable(description: &str) -> bool {
    let lower = description.to_lowercase();
    lower.contains("chat not found")
        || lower.contains("bot was blocked by the user")
        || lower.contains("user is deactivated")
}

/// Drop HTML tags and unescape entities for a plain-text resend
pub(crate) fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

impl super::TelegramChannel {
    fn method_url(&self, method: &str) -> String {
        format!("{}{}/{method}", self.api_base, self.token.expose_secret())
    }

    async fn post<T: Serialize + Sync>(&self, method: &str, request: &T) -> Result<Outcome> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram {method} error: {}", e.without_url())))?;

        let status = response.status();
        if status.is_success() {
            return Ok(Outcome::Accepted);
        }

        let body = response.text().await.unwrap_or_default();
        let description = serde_json::from_str::<TelegramResponse>(&body)
            .ok()
            .and_then(|r| r.description)
            .unwrap_or(body);

        Ok(Outcome::Rejected {
            status,
            description,
        })
    }

    /// Send an HTML message to a chat
    ///
    /// A client error (usually malformed markup) is retried once as plain
    /// text. Unreachable chats are reported without retrying.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let markup = keyboard.map(ReplyMarkup::from);
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: Some(PARSE_MODE_HTML),
            reply_markup: markup.as_ref(),
        };

        let (status, description) = match self.post("sendMessage", &request).await? {
            Outcome::Accepted => {
                tracing::debug!(chat_id, "Telegram message sent");
                return Ok(());
            }
            Outcome::Rejected {
                status,
                description,
            } => (status, description),
        };

        if is_unreachable(&description) {
            return Err(Error::Channel(format!(
                "Telegram chat {chat_id} not reachable: {description}"
            )));
        }
        if !status.is_client_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::Channel(format!(
                "Telegram sendMessage error: {status} - {description}"
            )));
        }

        tracing::warn!(chat_id, %status, %description, "HTML message rejected, retrying as plain text");
        let plain = plain_text(text);
        let fallback = SendMessageRequest {
            chat_id,
            text: &plain,
            parse_mode: None,
            reply_markup: markup.as_ref(),
        };
        self.post("sendMessage", &fallback)
            .await?
            .into_result("sendMessage")
    }

    /// Send a photo (URL or file id) with an optional HTML caption
    ///
    /// If Telegram refuses the photo itself, the caption is sent as a text
    /// message instead so the item still shows up.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: Option<&str>,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let markup = keyboard.map(ReplyMarkup::from);
        let request = SendPhotoRequest {
            chat_id,
            photo,
            caption,
            parse_mode: caption.map(|_| PARSE_MODE_HTML),
            reply_markup: markup.as_ref(),
        };

        match self.post("sendPhoto", &request).await? {
            Outcome::Accepted => {
                tracing::debug!(chat_id, "Telegram photo sent");
                Ok(())
            }
            Outcome::Rejected { description, .. } if is_unreachable(&description) => Err(
                Error::Channel(format!("Telegram chat {chat_id} not reachable: {description}")),
            ),
            Outcome::Rejected {
                status,
                description,
            } => {
                tracing::warn!(chat_id, %status, %description, photo, "photo rejected, sending caption as text");
                self.send_message(chat_id, caption.unwrap_or_default(), keyboard)
                    .await
            }
        }
    }

    /// Dismiss the loading spinner on a pressed inline button
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<()> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_query_id.to_string(),
            text: text.map(String::from),
        };

        self.post("answerCallbackQuery", &request)
            .await?
            .into_result("answerCallbackQuery")
    }

    /// Set webhook URL for receiving updates
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<()> {
        let request = SetWebhookRequest {
            url: url.to_string(),
            allowed_updates: Some(vec!["message".to_string(), "callback_query".to_string()]),
            secret_token: secret_token.map(String::from),
        };

        self.post("setWebhook", &request)
            .await?
            .into_result("setWebhook")?;

        tracing::info!(url, "Telegram webhook set");
        Ok(())
    }

    /// Remove the registered webhook
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn delete_webhook(&self) -> Result<()> {
        self.post("deleteWebhook", &serde_json::json!({}))
            .await?
            .into_result("deleteWebhook")?;

        tracing::info!("Telegram webhook deleted");
        Ok(())
    }
}
