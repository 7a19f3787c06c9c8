//! Supabase (`PostgREST`) config store

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{ChatId, ConfigStore};
use crate::config::StoreConfig;
use crate::{Error, Result};

/// Upper bound for one REST call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tenant row projection (`select=config_json`)
#[derive(Debug, Deserialize)]
struct TenantRow {
    #[serde(default)]
    config_json: Value,
}

/// Binding row projection (`select=bot_id`)
#[derive(Debug, Deserialize)]
struct BindingRow {
    #[serde(default)]
    bot_id: Option<String>,
}

/// Binding row as written
#[derive(Debug, Serialize)]
struct BindingUpsert<'a> {
    telegram_chat_id: String,
    bot_id: &'a str,
}

/// Config store backed by Supabase's REST interface
#[derive(Clone)]
pub struct SupabaseStore {
    rest_base: Url,
    service_key: SecretString,
    tenants_table: String,
    bindings_table: String,
    client: Client,
}

impl SupabaseStore {
    /// Create a store client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configured URL is not a valid base URL or the
    /// HTTP client cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base = Url::parse(&format!("{}/", config.url.trim_end_matches('/')))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid SUPABASE_URL: {}", config.url)));
        }
        let rest_base = base.join("rest/v1/")?;

        Ok(Self {
            rest_base,
            service_key: config.service_key.clone(),
            tenants_table: config.tenants_table.clone(),
            bindings_table: config.bindings_table.clone(),
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
        })
    }

    /// REST endpoint of a table
    fn table_url(&self, table: &str) -> Result<Url> {
        Ok(self.rest_base.join(table)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        request
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn check(response: Response, op: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Store(format!("{op} failed: {status} - {body}")))
    }

    async fn select<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        filter: (&str, String),
        columns: &str,
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        let request = self
            .client
            .get(url)
            .query(&[(filter.0, filter.1.as_str()), ("select", columns), ("limit", "1")]);

        let response = self.authorized(request).send().await?;
        let response = Self::check(response, &format!("select from {table}")).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ConfigStore for SupabaseStore {
    async fn tenant_config(&self, tenant_id: &str) -> Result<Option<Value>> {
        let rows: Vec<TenantRow> = self
            .select(
                &self.tenants_table,
                ("id", format!("eq.{tenant_id}")),
                "config_json",
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| match row.config_json {
            config @ Value::Object(_) => config,
            _ => Value::Object(serde_json::Map::new()),
        }))
    }

    async fn chat_binding(&self, chat_id: ChatId) -> Result<Option<String>> {
        let rows: Vec<BindingRow> = self
            .select(
                &self.bindings_table,
                ("telegram_chat_id", format!("eq.{chat_id}")),
                "bot_id",
            )
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.bot_id)
            .filter(|id| !id.trim().is_empty()))
    }

    async fn upsert_chat_binding(&self, chat_id: ChatId, tenant_id: &str) -> Result<()> {
        let url = self.table_url(&self.bindings_table)?;
        let body = BindingUpsert {
            telegram_chat_id: chat_id.to_string(),
            bot_id: tenant_id,
        };

        let request = self
            .client
            .post(url)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body);

        let response = self.authorized(request).send().await?;
        Self::check(response, "binding upsert").await?;

        tracing::debug!(chat_id, tenant_id, "chat binding upserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> StoreConfig {
        StoreConfig {
            url: url.to_string(),
            service_key: SecretString::new("key".into()),
            tenants_table: "bots".to_string(),
            bindings_table: "telegram_sessions".to_string(),
        }
    }

    #[test]
    fn table_urls_are_built_under_rest_v1() {
        let store = SupabaseStore::new(&config("https://abc.supabase.co/")).unwrap();
        assert_eq!(
            store.table_url("bots").unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/bots"
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(SupabaseStore::new(&config("not a url")).is_err());
        assert!(SupabaseStore::new(&config("mailto:someone@example.com")).is_err());
    }

    #[test]
    fn binding_row_tolerates_null_bot_id() {
        let rows: Vec<BindingRow> = serde_json::from_str(r#"[{"bot_id": null}]"#).unwrap();
        assert!(rows[0].bot_id.is_none());
    }
}
