//! Headless CMS document store
//!
//! Documents are fetched through the CMS query API:
//! `GET {base}/v{api_version}/data/query/{dataset}?query=...&$slug=...`.
//! Query parameters are passed JSON-encoded, and the response wraps the
//! single match (or `null`) in a `result` field.

use std::time::Duration;

use advocacy_site_core::config::CmsConfig;
use advocacy_site_core::ContentDocument;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{server_error, ClientError, Result};
use crate::store::{DocumentQuery, DocumentStore};

/// Fields returned for every document
const PROJECTION: &str = r#"{_id, "slug": slug.current, language, title, body, mainImage, "author": author->{name, "slug": slug.current}, excerpt, publishedAt}"#;

/// Query API response envelope
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Document store backed by the headless CMS
#[derive(Debug, Clone)]
pub struct CmsDocumentStore {
    /// Base URL of the query API
    base_url: String,

    /// API version
    api_version: String,

    /// Dataset name
    dataset: String,

    /// Document type the queries are restricted to
    document_type: String,

    /// Read token
    token: Option<String>,

    /// HTTP client
    client: Client,

    /// Timeout for requests
    timeout: Duration,
}

impl CmsDocumentStore {
    /// Create a store for `dataset` at `base_url` with default settings
    pub fn new(base_url: &str, dataset: &str) -> Self {
        let defaults = CmsConfig::default();
        let timeout = defaults.timeout();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: defaults.api_version,
            dataset: dataset.to_string(),
            document_type: defaults.document_type,
            token: None,
            client: Client::new(),
            timeout,
        }
    }

    /// Create a store from configuration; the base URL is required
    pub fn from_config(config: &CmsConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::Config("cms.base_url is not set".to_string()))?;

        let mut store = Self::new(base_url, &config.dataset)
            .with_document_type(&config.document_type)
            .with_api_version(&config.api_version);
        store.token = config.token.clone();
        store.set_timeout(config.timeout());
        Ok(store)
    }

    /// Set the read token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Set the document type
    pub fn with_document_type(mut self, document_type: &str) -> Self {
        self.document_type = document_type.to_string();
        self
    }

    /// Set the API version
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// Set the timeout for requests
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Filter expression for a query, projected to the document fields
    pub fn build_filter(&self, query: &DocumentQuery) -> String {
        let language_clause = if query.language.is_some() {
            " && language == $language"
        } else {
            ""
        };
        format!(
            "*[_type == $type && slug.current == $slug{}][0]{}",
            language_clause, PROJECTION
        )
    }

    fn query_url(&self) -> String {
        format!("{}/v{}/data/query/{}", self.base_url, self.api_version, self.dataset)
    }
}

#[async_trait]
impl DocumentStore for CmsDocumentStore {
    async fn fetch_one(&self, query: &DocumentQuery) -> Result<Option<ContentDocument>> {
        let url = self.query_url();
        debug!("Querying CMS at {} for {}", url, query);

        let mut params = vec![
            ("query".to_string(), self.build_filter(query)),
            ("$type".to_string(), serde_json::to_string(&self.document_type)?),
            ("$slug".to_string(), serde_json::to_string(&query.slug)?),
        ];
        if let Some(language) = &query.language {
            params.push(("$language".to_string(), serde_json::to_string(language)?));
        }

        let mut request = self.client.get(&url).query(&params).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body: QueryResponse<ContentDocument> = response.json().await?;
        Ok(body.result)
    }
}
