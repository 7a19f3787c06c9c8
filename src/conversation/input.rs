//! Inbound input classification

use super::CallbackAction;

/// Command token opening a conversation
const START_COMMAND: &str = "/start";

/// A parsed `/start` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCommand {
    payload: Option<String>,
}

impl StartCommand {
    /// Parse `/start`, `/start <payload>` or `/start@BotName <payload>`
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (command, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));

        let command = command.split_once('@').map_or(command, |(cmd, _bot)| cmd);
        if command != START_COMMAND {
            return None;
        }

        let payload = rest.trim();
        Some(Self {
            payload: (!payload.is_empty()).then(|| payload.to_string()),
        })
    }

    /// Deep-link payload (a tenant id), if any
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

/// One inbound user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `/start` command, with or without a deep-link payload
    Start(StartCommand),
    /// Free text (trimmed, possibly empty for media-only messages)
    Text(String),
    /// Recognized inline button press
    Callback(CallbackAction),
    /// Button press with unrecognized data
    UnknownCallback(String),
}

impl Input {
    /// Classify message text
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        StartCommand::parse(text).map_or_else(|| Self::Text(text.trim().to_string()), Self::Start)
    }

    /// Classify callback data
    #[must_use]
    pub fn from_callback(data: &str) -> Self {
        CallbackAction::parse(data)
            .map_or_else(|| Self::UnknownCallback(data.to_string()), Self::Callback)
    }

    /// The start command, if this input is one
    #[must_use]
    pub const fn start(&self) -> Option<&StartCommand> {
        match self {
            Self::Start(cmd) => Some(cmd),
            _ => None,
        }
    }
}
