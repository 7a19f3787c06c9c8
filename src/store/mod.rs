//! Remote configuration store
//!
//! Holds tenant configuration rows and chat → tenant bindings. Production uses
//! the Supabase REST interface; tests and local runs use [`MemoryStore`].

mod memory;
mod supabase;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Chat identifier as issued by the messaging provider
pub type ChatId = i64;

/// Read/write access to tenant configs and chat bindings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the raw configuration blob of a tenant, `None` if no such tenant
    async fn tenant_config(&self, tenant_id: &str) -> Result<Option<Value>>;

    /// Fetch the tenant currently bound to a chat
    async fn chat_binding(&self, chat_id: ChatId) -> Result<Option<String>>;

    /// Bind a chat to a tenant, replacing any previous binding
    async fn upsert_chat_binding(&self, chat_id: ChatId, tenant_id: &str) -> Result<()>;
}
