//! Configuration for the site
//!
//! This module provides the configuration sections shared by the clients and
//! the web service: locales, upstream endpoints, dictionary data and
//! rendering options. Every section has defaults so partial files load.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::locale::{DEFAULT_LOCALE, ENGLISH, NEPALI};

/// Locale configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when a translation is missing
    pub default_locale: String,

    /// Locales offered by the site
    pub supported_locales: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        LocaleConfig {
            default_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: vec![ENGLISH.to_string(), NEPALI.to_string()],
        }
    }
}

/// Headless CMS (document store) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Query API base URL; documents come from local fixtures when unset
    pub base_url: Option<String>,

    /// API version segment of the query URL
    pub api_version: String,

    /// Dataset name
    pub dataset: String,

    /// Document type queried by the resolver
    pub document_type: String,

    /// Read token for private datasets
    pub token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        CmsConfig {
            base_url: None,
            api_version: "2023-05-03".to_string(),
            dataset: "production".to_string(),
            document_type: "page".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

impl CmsConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Legacy blog REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Site root of the blog, e.g. `https://blog.example.org`
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        BlogConfig {
            base_url: None,
            timeout_secs: 10,
        }
    }
}

impl BlogConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Cloud file-storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// OAuth token endpoint
    pub token_url: Option<String>,

    /// Client identifier for the client-credentials grant
    pub client_id: Option<String>,

    /// Client secret for the client-credentials grant
    pub client_secret: Option<String>,

    /// Requested scope
    pub scope: String,

    /// File API base URL
    pub api_base: String,

    /// Drive holding the publications
    pub drive_id: Option<String>,

    /// Folder path of the publications inside the drive
    pub publications_folder: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        FileStorageConfig {
            token_url: None,
            client_id: None,
            client_secret: None,
            scope: "https://graph.microsoft.com/.default".to_string(),
            api_base: "https://graph.microsoft.com/v1.0".to_string(),
            drive_id: None,
            publications_folder: "Publications".to_string(),
            timeout_secs: 15,
        }
    }
}

impl FileStorageConfig {
    /// Whether every credential needed to list publications is set
    pub fn is_configured(&self) -> bool {
        self.token_url.is_some()
            && self.client_id.is_some()
            && self.client_secret.is_some()
            && self.drive_id.is_some()
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Dictionary data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Path of the JSON array of entries; the dictionary is empty when unset
    pub data_path: Option<PathBuf>,
}

/// Rich-content rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL image asset references resolve against
    pub image_base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            image_base_url: "/images".to_string(),
        }
    }
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Locale configuration
    pub locale: LocaleConfig,

    /// Document store configuration
    pub cms: CmsConfig,

    /// Legacy blog configuration
    pub blog: BlogConfig,

    /// File-storage configuration
    pub file_storage: FileStorageConfig,

    /// Dictionary configuration
    pub dictionary: DictionaryConfig,

    /// Rendering configuration
    pub render: RenderConfig,

    /// JSON file of documents served when no CMS endpoint is configured
    pub content_fixtures: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            locale: LocaleConfig::default(),
            cms: CmsConfig::default(),
            blog: BlogConfig::default(),
            file_storage: FileStorageConfig::default(),
            dictionary: DictionaryConfig::default(),
            render: RenderConfig::default(),
            content_fixtures: None,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if !self
            .locale
            .supported_locales
            .iter()
            .any(|locale| locale == &self.locale.default_locale)
        {
            return Err(CoreError::ConfigError(format!(
                "default locale '{}' is not among the supported locales",
                self.locale.default_locale
            )));
        }
        if self.cms.base_url.is_some() && self.cms.dataset.is_empty() {
            return Err(CoreError::ConfigError("cms.dataset must be set".to_string()));
        }
        Ok(())
    }

    /// Create a development configuration
    pub fn development() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config
    }

    /// Create a testing configuration
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config.cms.timeout_secs = 2;
        config.blog.timeout_secs = 2;
        config.file_storage.timeout_secs = 2;
        config
    }
}
