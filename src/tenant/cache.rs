//! Process-lifetime tenant cache

use std::sync::Arc;

use mini_moka::sync::Cache;

use super::Tenant;
use crate::Result;
use crate::store::ConfigStore;

/// Memoizes loaded tenants (config + normalized menu) by tenant id
///
/// Entries never expire: a tenant edited in the dashboard is picked up on the
/// next process start. Missing tenants are not cached, so a link that starts
/// working later is honored without a restart.
#[derive(Clone)]
pub struct TenantCache {
    store: Arc<dyn ConfigStore>,
    entries: Cache<String, Arc<Tenant>>,
}

impl TenantCache {
    /// Create an empty cache over a config store
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            entries: Cache::builder().build(),
        }
    }

    /// Get a tenant, fetching and normalizing it on first use
    ///
    /// Returns `Ok(None)` when the store has no such tenant.
    ///
    /// # Errors
    ///
    /// Returns error if the store request fails
    pub async fn get(&self, tenant_id: &str) -> Result<Option<Arc<Tenant>>> {
        let key = tenant_id.to_string();
        if let Some(tenant) = self.entries.get(&key) {
            return Ok(Some(tenant));
        }

        let Some(raw) = self.store.tenant_config(tenant_id).await? else {
            tracing::warn!(tenant_id, "tenant not found");
            return Ok(None);
        };

        let tenant = Arc::new(Tenant::from_raw(raw));
        tracing::info!(
            tenant_id,
            restaurant = %tenant.config.restaurant_name,
            items = tenant.menu.item_count(),
            "tenant loaded"
        );
        self.entries.insert(key, Arc::clone(&tenant));
        Ok(Some(tenant))
    }

    /// Whether a tenant is currently cached
    #[must_use]
    pub fn contains(&self, tenant_id: &str) -> bool {
        self.entries.contains_key(&tenant_id.to_string())
    }
}
