//! Cloud file storage and publications
//!
//! Publications (reports, brochures) live in a folder of a cloud drive. The
//! file API is authenticated with an OAuth client-credentials token, cached
//! in a [`TokenCache`] and refreshed shortly before it expires.

use std::time::Duration;

use advocacy_site_core::config::FileStorageConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{server_error, ClientError, Result};

/// Seconds before expiry at which a cached token is replaced
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Bearer token with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Token value
    pub value: String,

    /// Instant the issuer stops accepting the token
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token can still be used at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS)
    }
}

/// Issuer of access tokens
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a new token
    async fn fetch_token(&self) -> Result<AccessToken>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    token_type: String,
}

/// OAuth client-credentials grant
#[derive(Debug, Clone)]
pub struct ClientCredentialsAuth {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    client: Client,
    timeout: Duration,
}

impl ClientCredentialsAuth {
    /// Create a grant against `token_url`
    pub fn new(token_url: &str, client_id: &str, client_secret: &str, scope: &str) -> Self {
        Self {
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            scope: scope.to_string(),
            client: Client::new(),
            timeout: FileStorageConfig::default().timeout(),
        }
    }

    /// Set the timeout for token requests
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsAuth {
    async fn fetch_token(&self) -> Result<AccessToken> {
        debug!("Requesting access token from {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!("{} - {}", status, text)));
        }

        let token: TokenResponse = response.json().await?;
        if !token.token_type.is_empty() && !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ClientError::Auth(format!(
                "unsupported token type '{}'",
                token.token_type
            )));
        }

        let expires_at = Some(token.expires_in)
            .filter(|secs| *secs >= 0)
            .and_then(chrono::Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| ClientError::Auth(format!("invalid token lifetime {}s", token.expires_in)))?;

        Ok(AccessToken {
            value: token.access_token,
            expires_at,
        })
    }
}

/// Expiry-tracked cache in front of a [`TokenSource`]
///
/// Concurrent callers that find the token stale may each fetch a new one;
/// the last write wins and every fetched token is valid.
pub struct TokenCache<S> {
    source: S,
    cached: RwLock<Option<AccessToken>>,
}

impl<S: TokenSource> TokenCache<S> {
    /// Create an empty cache
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// Current token value, fetching a new one when needed
    pub async fn token(&self) -> Result<String> {
        self.token_at(Utc::now()).await
    }

    /// Token value as seen at `now`
    pub async fn token_at(&self, now: DateTime<Utc>) -> Result<String> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh_at(now) {
                return Ok(token.value.clone());
            }
        }

        let token = self.source.fetch_token().await?;
        info!("Obtained access token valid until {}", token.expires_at);
        let value = token.value.clone();
        *self.cached.write().await = Some(token);
        Ok(value)
    }

    /// Drop the cached token
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

/// File in the publications folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Drive item ID
    pub id: String,

    /// File name
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// Last modification time
    pub last_modified: DateTime<Utc>,

    /// Short-lived direct download URL
    pub download_url: Option<String>,

    /// Browser URL
    pub web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveItem {
    id: String,
    name: String,
    #[serde(default)]
    size: u64,
    last_modified_date_time: DateTime<Utc>,
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    download_url: Option<String>,
    web_url: Option<String>,
    file: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DriveItemPage {
    value: Vec<DriveItem>,
    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,
}

impl From<DriveItem> for Publication {
    fn from(item: DriveItem) -> Self {
        Publication {
            id: item.id,
            name: item.name,
            size: item.size,
            last_modified: item.last_modified_date_time,
            download_url: item.download_url,
            web_url: item.web_url,
        }
    }
}

/// Client for the cloud file API
pub struct FileStorageClient<S = ClientCredentialsAuth> {
    api_base: String,
    drive_id: String,
    publications_folder: String,
    client: Client,
    timeout: Duration,
    tokens: TokenCache<S>,
}

impl FileStorageClient<ClientCredentialsAuth> {
    /// Create a client from configuration; every credential is required
    pub fn from_config(config: &FileStorageConfig) -> Result<Self> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| ClientError::Config(format!("file_storage.{} is not set", name)))
        };

        let mut auth = ClientCredentialsAuth::new(
            &required(&config.token_url, "token_url")?,
            &required(&config.client_id, "client_id")?,
            &required(&config.client_secret, "client_secret")?,
            &config.scope,
        );
        auth.set_timeout(config.timeout());

        let mut client = Self::with_token_source(&config.api_base, &required(&config.drive_id, "drive_id")?, auth);
        client.publications_folder = config.publications_folder.clone();
        client.timeout = config.timeout();
        Ok(client)
    }
}

impl<S: TokenSource> FileStorageClient<S> {
    /// Create a client with its own token source
    pub fn with_token_source(api_base: &str, drive_id: &str, source: S) -> Self {
        let defaults = FileStorageConfig::default();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            drive_id: drive_id.to_string(),
            publications_folder: defaults.publications_folder.clone(),
            client: Client::new(),
            timeout: defaults.timeout(),
            tokens: TokenCache::new(source),
        }
    }

    /// Files of the configured publications folder
    pub async fn publications(&self) -> Result<Vec<Publication>> {
        self.list_publications(&self.publications_folder).await
    }

    /// URL listing the children of `folder`, each path segment percent-encoded
    fn children_url(&self, folder: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| ClientError::Config(format!("invalid file API base '{}': {}", self.api_base, e)))?;
        let parts: Vec<&str> = folder.split('/').filter(|part| !part.is_empty()).collect();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config(format!("file API base '{}' cannot hold a path", self.api_base)))?;
            segments.pop_if_empty().extend(["drives", self.drive_id.as_str()]);
            match parts.split_last() {
                Some((last, parents)) => {
                    segments.push("root:").extend(parents.iter().copied());
                    segments.push(&format!("{}:", last));
                }
                None => {
                    segments.push("root");
                }
            }
            segments.push("children");
        }
        Ok(url)
    }

    /// Files of `folder`, most recently modified first
    pub async fn list_publications(&self, folder: &str) -> Result<Vec<Publication>> {
        let mut next = Some(self.children_url(folder)?.to_string());
        let token = self.tokens.token().await?;
        let mut publications = Vec::new();

        while let Some(url) = next.take() {
            debug!("Listing publications at {}", url);
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .timeout(self.timeout)
                .send()
                .await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                warn!("File API rejected the access token");
                self.tokens.invalidate().await;
                return Err(ClientError::Auth("access token rejected".to_string()));
            }
            if !response.status().is_success() {
                return Err(server_error(response).await);
            }

            let page: DriveItemPage = response.json().await?;
            publications.extend(
                page.value
                    .into_iter()
                    .filter(|item| item.file.is_some())
                    .map(Publication::from),
            );
            next = page.next_link;
        }

        publications.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(publications)
    }
}
