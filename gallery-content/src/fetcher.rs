//! CMS content fetcher
//!
//! Read-only HTTP GETs against `<base>/api/<collection>`. Every request
//! bypasses intermediate caches; non-success statuses become
//! [`ContentError::Fetch`] carrying the status and response body.

use crate::error::{ContentError, Result};
use gallery_common::config::ConfigResolver;
use gallery_common::{BaseUrl, CmsConfig};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use tracing::{debug, info, warn};

/// One collection request: path plus Strapi-style query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    collection: String,
    params: Vec<(String, String)>,
}

impl ResourceQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            params: Vec::new(),
        }
    }

    /// `populate=<relation>`; may be repeated
    pub fn populate(mut self, relation: impl Into<String>) -> Self {
        self.params.push(("populate".to_string(), relation.into()));
        self
    }

    /// `populate[<relation>]=true`
    pub fn populate_field(mut self, relation: &str) -> Self {
        self.params
            .push((format!("populate[{}]", relation), "true".to_string()));
        self
    }

    /// `filters[<field>][$eq]=<value>` (server-side equality filter)
    pub fn filter_eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.params
            .push((format!("filters[{}][$eq]", field), value.into()));
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Path relative to the base URL
    pub fn path(&self) -> String {
        format!("api/{}", self.collection.trim_matches('/'))
    }

    /// Label used in error messages (`artwork-archives` → `Artwork archives`)
    pub fn label(&self) -> String {
        let words = self.collection.replace(['-', '_'], " ");
        let mut chars = words.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// HTTP client for the CMS
#[derive(Debug, Clone)]
pub struct ContentClient {
    http_client: reqwest::Client,
    base_url: BaseUrl,
}

impl ContentClient {
    /// Build a client from explicit configuration
    ///
    /// Fails with [`ContentError::Configuration`] when no base URL is set.
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let base_url = config.require_base_url()?.clone();

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ContentError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build a client from the environment / TOML configuration
    pub fn from_environment() -> Result<Self> {
        let config = ConfigResolver::new().resolve(None)?;
        Self::new(&config)
    }

    /// Base URL used to absolutize relative media URLs
    pub fn media_base(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Issue one GET and return the parsed JSON body
    pub async fn get_json(&self, query: &ResourceQuery) -> Result<Value> {
        let url = self.base_url.join(&query.path());

        debug!(url = %url, params = ?query.params(), "Querying CMS");

        let response = self
            .http_client
            .get(&url)
            .query(query.params())
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "CMS request failed");
            return Err(ContentError::Fetch {
                resource: query.label(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ContentError::Parse(format!("{}: {}", query.label(), e)))
    }

    /// Fetch a collection and return its raw `data` entries
    ///
    /// A single-object `data` (single types) yields one entry; a missing or
    /// null `data` yields none.
    pub async fn fetch_collection(&self, query: &ResourceQuery) -> Result<Vec<Value>> {
        let body = self.get_json(query).await?;
        let entries = data_entries(body);

        info!(
            collection = %query.collection(),
            count = entries.len(),
            "Retrieved collection from CMS"
        );

        Ok(entries)
    }

    /// Fetch two collections concurrently; both must succeed
    pub async fn fetch_pair(
        &self,
        first: &ResourceQuery,
        second: &ResourceQuery,
    ) -> Result<(Vec<Value>, Vec<Value>)> {
        tokio::try_join!(self.fetch_collection(first), self.fetch_collection(second))
    }
}

/// Extract the entries of a `{ data: ... }` envelope
pub fn data_entries(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![single],
        },
        _ => Vec::new(),
    }
}
