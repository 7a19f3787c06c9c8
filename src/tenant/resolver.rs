//! Tenant resolution for inbound updates

use std::sync::Arc;

use super::{TenantCache, TenantContext};
use crate::conversation::StartCommand;
use crate::render::texts;
use crate::store::{ChatId, ConfigStore};

/// Why an update could not be tied to a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Deep link names a tenant that does not exist
    InvalidLink,
    /// Bare `/start` from a chat without a binding
    UseOfficialLink,
    /// Ordinary message from a chat without a binding
    NotBound,
    /// Binding exists but its tenant could not be loaded
    ConfigUnavailable,
}

impl Rejection {
    /// Message explaining the rejection to the user
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidLink => texts::INVALID_LINK,
            Self::UseOfficialLink => texts::USE_OFFICIAL_LINK,
            Self::NotBound => texts::NO_TENANT_BOUND,
            Self::ConfigUnavailable => texts::CONFIG_UNAVAILABLE,
        }
    }
}

/// Outcome of resolving an update's tenant
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(TenantContext),
    Rejected(Rejection),
}

/// Determines which tenant owns a chat
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn ConfigStore>,
    cache: TenantCache,
}

impl TenantResolver {
    /// Create a resolver over a config store and tenant cache
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>, cache: TenantCache) -> Self {
        Self { store, cache }
    }

    /// The tenant cache backing this resolver
    #[must_use]
    pub const fn cache(&self) -> &TenantCache {
        &self.cache
    }

    /// Resolve the tenant for an update from `chat_id`
    ///
    /// A `/start <tenant_id>` deep link always wins and (re)binds the chat.
    /// Anything else uses the persisted binding.
    pub async fn resolve(&self, chat_id: ChatId, start: Option<&StartCommand>) -> Resolution {
        if let Some(tenant_id) = start.and_then(StartCommand::payload) {
            return self.bind(chat_id, tenant_id).await;
        }

        let binding = match self.store.chat_binding(chat_id).await {
            Ok(binding) => binding,
            Err(e) => {
                tracing::error!(chat_id, error = %e, "failed to look up chat binding");
                return Resolution::Rejected(Rejection::ConfigUnavailable);
            }
        };

        let Some(tenant_id) = binding else {
            tracing::debug!(chat_id, "chat has no tenant binding");
            return Resolution::Rejected(if start.is_some() {
                Rejection::UseOfficialLink
            } else {
                Rejection::NotBound
            });
        };

        match self.cache.get(&tenant_id).await {
            Ok(Some(tenant)) => Resolution::Resolved(TenantContext {
                tenant_id,
                tenant,
                freshly_bound: false,
            }),
            Ok(None) => {
                tracing::warn!(chat_id, tenant_id = %tenant_id, "bound tenant no longer exists");
                Resolution::Rejected(Rejection::ConfigUnavailable)
            }
            Err(e) => {
                tracing::error!(chat_id, tenant_id = %tenant_id, error = %e, "failed to load bound tenant");
                Resolution::Rejected(Rejection::ConfigUnavailable)
            }
        }
    }

    async fn bind(&self, chat_id: ChatId, tenant_id: &str) -> Resolution {
        let tenant = match self.cache.get(tenant_id).await {
            Ok(Some(tenant)) => tenant,
            Ok(None) => return Resolution::Rejected(Rejection::InvalidLink),
            Err(e) => {
                tracing::error!(chat_id, tenant_id, error = %e, "failed to load deep-linked tenant");
                return Resolution::Rejected(Rejection::ConfigUnavailable);
            }
        };

        if let Err(e) = self.store.upsert_chat_binding(chat_id, tenant_id).await {
            tracing::warn!(chat_id, tenant_id, error = %e, "failed to persist chat binding");
        } else {
            tracing::info!(chat_id, tenant_id, "chat bound to tenant");
        }

        Resolution::Resolved(TenantContext {
            tenant_id: tenant_id.to_string(),
            tenant,
            freshly_bound: true,
        })
    }
}
