//! Backend API client
//!
//! Thin reqwest wrapper over the CRM's read endpoints. Raw rows are
//! normalized at fetch time so nothing downstream ever sees backend-shaped
//! JSON. Authentication is a bearer token attached when configured;
//! requests proceed unauthenticated otherwise.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Alert, Client, ClientKind, Page, SentMessage};
use crate::normalize::{normalize_alert, normalize_client, normalize_messages};
use crate::query::{AlertQuery, ClientQuery};

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    has_more: bool,
}

/// Detail endpoint envelope: `{ "type": "physical" | "moral", "data": row }`
#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.token.as_deref())
    }

    /// One page of a client population, normalized
    pub async fn list_clients(&self, query: &ClientQuery) -> Result<Page<Client>> {
        let kind = query.kind();
        let path = format!("/clients/{}", kind.path_segment());
        let raw: RawPage = self.get(&path, &query.to_params()).await?;
        debug!(kind = %kind, count = raw.items.len(), "Fetched client page");

        let items: Vec<Client> = raw
            .items
            .iter()
            .map(|row| normalize_client(row, kind))
            .collect();
        for client in &items {
            if client.reference().is_empty() {
                warn!(kind = %kind, "Client row carries no usable reference");
            }
        }

        Ok(Page {
            items,
            has_more: raw.has_more,
        })
    }

    /// One page of alerts, normalized
    pub async fn list_alerts(&self, query: &AlertQuery) -> Result<Page<Alert>> {
        let raw: RawPage = self.get("/alerts", &query.to_params()).await?;
        debug!(count = raw.items.len(), "Fetched alert page");

        Ok(Page {
            items: raw.items.iter().map(normalize_alert).collect(),
            has_more: raw.has_more,
        })
    }

    /// Single-client detail lookup, used to join alert rows to contact info
    pub async fn client_details(&self, reference: &str) -> Result<Client> {
        let path = format!("/clients/{}", reference);
        let envelope: DetailEnvelope = self.get(&path, &[]).await?;
        let kind = envelope
            .kind
            .parse::<ClientKind>()
            .map_err(Error::InvalidData)?;
        Ok(normalize_client(&envelope.data, kind))
    }

    /// Full message history for one client, newest ordering left to the
    /// backend
    ///
    /// Rows go through the same alias reconciliation as message lists on
    /// client records: numeric ids and snake_case timestamps are accepted,
    /// and a malformed entry degrades to being dropped instead of failing
    /// the whole fetch.
    pub async fn history_messages(&self, reference: &str) -> Result<Vec<SentMessage>> {
        let path = format!("/history/{}/messages", reference);
        let raw: Vec<Value> = self.get(&path, &[]).await?;
        Ok(normalize_messages(&raw, reference))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let mut builder = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .query(params);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
