//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use menu_gateway::channels::{Channel, OutgoingMessage};
use menu_gateway::render::Reply;
use menu_gateway::session::SessionStore;
use menu_gateway::store::{ChatId, ConfigStore, MemoryStore};
use menu_gateway::tenant::{TenantCache, TenantResolver};
use menu_gateway::{Config, Error, OrderBot, Result};
use serde_json::json;

/// Channel that records everything it is asked to send
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<OutgoingMessage>>,
    answered: Mutex<Vec<String>>,
    /// When set, every send fails after being recorded
    fail_sends: bool,
    /// Delay before a callback is acknowledged
    answer_delay: Option<Duration>,
}

impl RecordingChannel {
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Channel whose callback acknowledgements take `delay`
    #[must_use]
    pub fn with_slow_answers(delay: Duration) -> Self {
        Self {
            answer_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Bodies of all replies sent to one chat, in order
    pub fn bodies(&self, chat_id: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .map(|m| m.reply.body().to_string())
            .collect()
    }

    /// Body of the last reply sent to a chat
    pub fn last_body(&self, chat_id: ChatId) -> String {
        self.bodies(chat_id).pop().expect("no reply sent")
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Wait until at least `count` replies were sent
    pub async fn wait_for(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.sent.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("timed out waiting for replies");
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail_sends {
            return Err(Error::Channel("chat not reachable".to_string()));
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        if let Some(delay) = self.answer_delay {
            tokio::time::sleep(delay).await;
        }
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

/// Store with two configured restaurants and one never configured
#[must_use]
pub fn tenant_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.put_tenant(
        "t1",
        json!({
            "restaurantName": "مطعم الشام",
            "restaurantTagline": "أكلات شرقية",
            "openingHours": "10:00 - 23:00",
            "menu": [
                {"id": "grill", "name": "مشاوي", "items": [
                    {"id": "kofta", "name": "كفتة", "description": "سيخين", "price": 12},
                    {"id": "mix", "name": "مشكل", "price": 0, "imageUrl": "https://cdn.example/mix.jpg"}
                ]},
                {"id": "drinks", "name": "مشروبات", "items": [
                    {"id": "ayran", "name": "عيران", "price": 1.5}
                ]}
            ]
        }),
    );
    store.put_tenant(
        "t2",
        json!({
            "restaurantName": "Pizza Roma",
            "menuItems": "Margherita – 8$\nFamily box – حسب"
        }),
    );
    store.put_tenant("empty", json!({"restaurantName": "Soon"}));
    store
}

/// Bot wired to a memory store and a recording channel
pub fn build_bot(store: &MemoryStore, channel: Arc<RecordingChannel>) -> OrderBot {
    let store: Arc<dyn ConfigStore> = Arc::new(store.clone());
    let resolver = TenantResolver::new(Arc::clone(&store), TenantCache::new(store));
    OrderBot::new(resolver, SessionStore::new(), channel)
}

/// Configuration with the required variables and an optional webhook secret
pub fn test_config(webhook_secret: Option<&str>) -> Config {
    Config::from_lookup(|key| match key {
        "TELEGRAM_BOT_TOKEN" => Some("123:test".to_string()),
        "SUPABASE_URL" => Some("http://localhost:54321".to_string()),
        "SUPABASE_SERVICE_ROLE_KEY" => Some("service-key".to_string()),
        "TELEGRAM_WEBHOOK_SECRET" => webhook_secret.map(String::from),
        "WHATSAPP_VERIFY_TOKEN" => Some("verify-me".to_string()),
        _ => None,
    })
    .expect("valid test config")
}

/// Whether a reply is a photo
pub fn is_photo(reply: &Reply) -> bool {
    matches!(reply, Reply::Photo { .. })
}
