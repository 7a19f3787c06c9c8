//! `WhatsApp` channel (inbound only)
//!
//! The Cloud API webhook is verified and its messages are parsed and logged.
//! No ordering flow is attached to `WhatsApp` yet.

use serde::Deserialize;

/// Answer a `hub.*` subscription handshake
///
/// Returns the challenge to echo back when the mode is `subscribe` and the
/// token matches.
#[must_use]
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: &str,
) -> Option<String> {
    (mode == Some("subscribe") && token == Some(expected_token))
        .then(|| challenge.unwrap_or_default().to_string())
}

/// `WhatsApp` webhook payload from Cloud API
#[derive(Debug, Default, Deserialize)]
pub struct WhatsAppWebhook {
    #[serde(default)]
    pub entry: Vec<WhatsAppWebhookEntry>,
}

/// `WhatsApp` webhook entry
#[derive(Debug, Deserialize)]
pub struct WhatsAppWebhookEntry {
    #[serde(default)]
    pub changes: Vec<WhatsAppWebhookChange>,
}

/// `WhatsApp` webhook change
#[derive(Debug, Deserialize)]
pub struct WhatsAppWebhookChange {
    pub value: WhatsAppWebhookValue,
}

/// `WhatsApp` webhook value containing messages
#[derive(Debug, Deserialize)]
pub struct WhatsAppWebhookValue {
    /// Incoming messages (absent for status callbacks)
    pub messages: Option<Vec<WhatsAppMessage>>,
}

/// `WhatsApp` message
#[derive(Debug, Deserialize)]
pub struct WhatsAppMessage {
    /// Sender phone number
    pub from: String,
    pub id: String,
    #[serde(rename = "type", default)]
    pub message_type: String,
    pub text: Option<WhatsAppTextContent>,
    pub image: Option<WhatsAppMedia>,
    pub video: Option<WhatsAppMedia>,
    pub document: Option<WhatsAppMedia>,
}

/// `WhatsApp` media object
#[derive(Debug, Deserialize)]
pub struct WhatsAppMedia {
    pub id: String,
    pub caption: Option<String>,
}

/// `WhatsApp` text message content
#[derive(Debug, Deserialize)]
pub struct WhatsAppTextContent {
    pub body: String,
}

/// A text (or media caption) received over `WhatsApp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundText {
    pub from: String,
    pub message_id: String,
    pub body: String,
}

impl WhatsAppMessage {
    /// Text body, or the caption of an image, video or document
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.text
            .as_ref()
            .map(|t| t.body.as_str())
            .or_else(|| {
                [&self.image, &self.video, &self.document]
                    .into_iter()
                    .flatten()
                    .find_map(|m| m.caption.as_deref())
            })
            .filter(|body| !body.trim().is_empty())
    }
}

impl WhatsAppWebhook {
    /// All text-bearing messages in the payload
    #[must_use]
    pub fn text_messages(&self) -> Vec<InboundText> {
        self.entry
            .iter()
            .flat_map(|entry| &entry.changes)
            .filter_map(|change| change.value.messages.as_ref())
            .flatten()
            .filter_map(|msg| {
                msg.body().map(|body| InboundText {
                    from: msg.from.clone(),
                    message_id: msg.id.clone(),
                    body: body.to_string(),
                })
            })
            .collect()
    }
}
