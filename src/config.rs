//! Configuration management for the menu gateway
//!
//! Everything is read from the process environment. The bot token and the
//! config store location and key are mandatory.

use secrecy::SecretString;

use crate::{Error, Result};

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default table holding tenant (restaurant bot) rows
pub const DEFAULT_TENANTS_TABLE: &str = "bots";

/// Default table holding chat → tenant bindings
pub const DEFAULT_BINDINGS_TABLE: &str = "telegram_sessions";

/// Default `WhatsApp` webhook verification token
pub const DEFAULT_WHATSAPP_VERIFY_TOKEN: &str = "acspro-verify";

/// Menu gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram channel configuration
    pub telegram: TelegramConfig,

    /// Remote config store configuration
    pub store: StoreConfig,

    /// `WhatsApp` channel configuration
    pub whatsapp: WhatsAppConfig,

    /// Port for the HTTP server
    pub port: u16,
}

/// Telegram channel configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token (from `TELEGRAM_BOT_TOKEN`)
    pub bot_token: SecretString,

    /// Expected `X-Telegram-Bot-Api-Secret-Token` header value
    pub webhook_secret: Option<String>,
}

/// Remote config store (Supabase REST) configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Service role key, sent as `apikey` and bearer token
    pub service_key: SecretString,

    /// Table holding tenant rows with a `config_json` column
    pub tenants_table: String,

    /// Table holding `telegram_chat_id` → `bot_id` bindings
    pub bindings_table: String,
}

/// `WhatsApp` channel configuration
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Token echoed back during webhook verification
    pub verify_token: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if `TELEGRAM_BOT_TOKEN`, `SUPABASE_URL` or
    /// `SUPABASE_SERVICE_ROLE_KEY` is missing, or the port is not a number
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = non_empty("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| Error::Config("TELEGRAM_BOT_TOKEN is required".to_string()))?;
        let url = non_empty("SUPABASE_URL")
            .ok_or_else(|| Error::Config("SUPABASE_URL is required".to_string()))?;
        let service_key = non_empty("SUPABASE_SERVICE_ROLE_KEY")
            .ok_or_else(|| Error::Config("SUPABASE_SERVICE_ROLE_KEY is required".to_string()))?;

        let port = match non_empty("MENU_GATEWAY_PORT").or_else(|| non_empty("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            telegram: TelegramConfig {
                bot_token: SecretString::new(bot_token.into()),
                webhook_secret: non_empty("TELEGRAM_WEBHOOK_SECRET"),
            },
            store: StoreConfig {
                url,
                service_key: SecretString::new(service_key.into()),
                tenants_table: non_empty("MENU_GATEWAY_TENANTS_TABLE")
                    .unwrap_or_else(|| DEFAULT_TENANTS_TABLE.to_string()),
                bindings_table: non_empty("MENU_GATEWAY_BINDINGS_TABLE")
                    .unwrap_or_else(|| DEFAULT_BINDINGS_TABLE.to_string()),
            },
            whatsapp: WhatsAppConfig {
                verify_token: non_empty("WHATSAPP_VERIFY_TOKEN")
                    .unwrap_or_else(|| DEFAULT_WHATSAPP_VERIFY_TOKEN.to_string()),
            },
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("SUPABASE_URL", "https://example.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
    ];

    fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        REQUIRED.iter().chain(extra).copied().collect()
    }

    #[test]
    fn defaults_apply_when_only_required_are_set() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.store.tenants_table, "bots");
        assert_eq!(config.store.bindings_table, "telegram_sessions");
        assert_eq!(config.store.service_key.expose_secret(), "service-key");
        assert_eq!(config.whatsapp.verify_token, "acspro-verify");
        assert_eq!(config.telegram.bot_token.expose_secret(), "123:abc");
        assert!(config.telegram.webhook_secret.is_none());
    }

    #[test]
    fn missing_store_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("SUPABASE_SERVICE_ROLE_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn gateway_port_wins_over_generic_port() {
        let config = Config::from_lookup(lookup(&with_required(&[
            ("PORT", "9000"),
            ("MENU_GATEWAY_PORT", "9100"),
        ])))
        .unwrap();
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup(&with_required(&[("PORT", "eighty")])));
        assert!(result.is_err());
    }

    #[test]
    fn blank_telegram_token_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "  "),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn optional_overrides_are_read() {
        let config = Config::from_lookup(lookup(&with_required(&[
            ("TELEGRAM_WEBHOOK_SECRET", "s3cret"),
            ("MENU_GATEWAY_TENANTS_TABLE", "restaurants"),
            ("WHATSAPP_VERIFY_TOKEN", "wa"),
        ])))
        .unwrap();

        assert_eq!(config.telegram.webhook_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.store.tenants_table, "restaurants");
        assert_eq!(config.whatsapp.verify_token, "wa");
    }
}
