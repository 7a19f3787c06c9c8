//! In-memory config store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{ChatId, ConfigStore};
use crate::Result;

#[derive(Debug, Default)]
struct Inner {
    tenants: HashMap<String, Value>,
    bindings: HashMap<ChatId, String>,
    tenant_fetches: usize,
}

/// Config store kept entirely in process memory
///
/// Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tenant configuration
    pub fn put_tenant(&self, tenant_id: impl Into<String>, config: Value) {
        self.write().tenants.insert(tenant_id.into(), config);
    }

    /// Remove a tenant configuration
    pub fn remove_tenant(&self, tenant_id: &str) {
        self.write().tenants.remove(tenant_id);
    }

    /// Current binding of a chat, without going through the async trait
    #[must_use]
    pub fn binding(&self, chat_id: ChatId) -> Option<String> {
        self.read().bindings.get(&chat_id).cloned()
    }

    /// Number of tenant config fetches served so far
    #[must_use]
    pub fn tenant_fetches(&self) -> usize {
        self.read().tenant_fetches
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn tenant_config(&self, tenant_id: &str) -> Result<Option<Value>> {
        let mut inner = self.write();
        inner.tenant_fetches += 1;
        Ok(inner.tenants.get(tenant_id).cloned())
    }

    async fn chat_binding(&self, chat_id: ChatId) -> Result<Option<String>> {
        Ok(self.binding(chat_id))
    }

    async fn upsert_chat_binding(&self, chat_id: ChatId, tenant_id: &str) -> Result<()> {
        self.write().bindings.insert(chat_id, tenant_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn upsert_overwrites_binding() {
        let store = MemoryStore::new();
        store.upsert_chat_binding(1, "t1").await.unwrap();
        store.upsert_chat_binding(1, "t2").await.unwrap();

        assert_eq!(store.chat_binding(1).await.unwrap().as_deref(), Some("t2"));
        assert!(store.chat_binding(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tenant_fetches_are_counted() {
        let store = MemoryStore::new();
        store.put_tenant("t1", json!({"restaurantName": "A"}));

        assert!(store.tenant_config("t1").await.unwrap().is_some());
        assert!(store.tenant_config("nope").await.unwrap().is_none());
        assert_eq!(store.tenant_fetches(), 2);
    }
}
