//! Tenants (restaurants) and their configuration
//!
//! One bot account serves many tenants. A chat reaches its tenant through a
//! deep link (`/start <tenant_id>`) and stays bound to it until the next
//! deep link.

mod cache;
mod resolver;

use std::sync::Arc;

use serde_json::Value;

use crate::menu::{self, Menu};
use crate::render::texts;

pub use cache::TenantCache;
pub use resolver::{Rejection, Resolution, TenantResolver};

/// Canonical tenant configuration record
///
/// Built from the raw `config_json` blob. Wrong types and blank strings are
/// treated as absent, so rendering never has to default anything again.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantConfig {
    pub restaurant_name: String,
    pub tagline: Option<String>,
    pub welcome_text: Option<String>,
    pub opening_hours: Option<String>,
    pub delivery_info: Option<String>,
    pub contact_phone: Option<String>,
    /// Raw blob, kept for menu normalization
    pub raw: Value,
}

impl TenantConfig {
    /// Build the canonical record from a raw config blob
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| raw.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };

        Self {
            restaurant_name: field(&["restaurantName", "name"])
                .unwrap_or_else(|| texts::DEFAULT_RESTAURANT_NAME.to_string()),
            tagline: field(&["restaurantTagline", "tagline"]),
            welcome_text: field(&["welcomeMessage", "welcomeText"]),
            opening_hours: field(&["openingHours"]),
            delivery_info: field(&["deliveryInfo"]),
            contact_phone: field(&["contactPhone", "phone"]),
            raw,
        }
    }
}

/// A loaded tenant: configuration snapshot plus its normalized menu
#[derive(Debug, Clone, PartialEq)]
pub struct Tenant {
    pub config: TenantConfig,
    pub menu: Menu,
}

impl Tenant {
    /// Load a tenant from a raw config blob, normalizing its menu
    #[must_use]
    pub fn from_raw(raw: Value) -> Self {
        let menu = menu::normalize(&raw);
        Self {
            config: TenantConfig::from_value(raw),
            menu,
        }
    }
}

/// A tenant resolved for one inbound update
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: String,
    pub tenant: Arc<Tenant>,
    /// Whether this update created (or replaced) the chat's binding
    pub freshly_bound: bool,
}

impl TenantContext {
    /// Tenant configuration
    #[must_use]
    pub fn config(&self) -> &TenantConfig {
        &self.tenant.config
    }

    /// Tenant menu
    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.tenant.menu
    }
}
