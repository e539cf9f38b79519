//! Shared application state

use std::sync::Arc;

use advocacy_site_client::{
    BlogClient, CmsDocumentStore, DocumentStore, FileStorageClient, InMemoryDocumentStore,
    LocalizedContentResolver,
};
use advocacy_site_core::config::SiteConfig;
use advocacy_site_core::{BlockRenderer, Dictionary, LocaleTag};
use tracing::{info, warn};

use crate::error::Result;

/// State shared by every handler; built once at startup
pub struct AppState {
    /// Content resolver over the configured document store
    pub resolver: LocalizedContentResolver,

    /// Legacy blog, when configured
    pub blog: Option<BlogClient>,

    /// Publications storage, when configured
    pub storage: Option<FileStorageClient>,

    /// Loaded glossary
    pub dictionary: Dictionary,

    /// Body renderer for pages
    pub renderer: BlockRenderer,

    /// Whether content comes from the CMS rather than local fixtures
    pub cms_enabled: bool,

    /// Locale of untranslated content
    pub default_locale: LocaleTag,

    /// Locales offered in the language switcher
    pub supported_locales: Vec<LocaleTag>,
}

impl AppState {
    /// Build the state from configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let (default_locale, supported_locales) = locales(config)?;

        let (store, cms_enabled): (Arc<dyn DocumentStore>, bool) = if config.cms.base_url.is_some() {
            info!("Serving content from the CMS");
            (Arc::new(CmsDocumentStore::from_config(&config.cms)?), true)
        } else if let Some(path) = &config.content_fixtures {
            info!("Serving content from fixtures at {}", path.display());
            (Arc::new(InMemoryDocumentStore::from_json_file(path)?), false)
        } else {
            warn!("No content source configured; every page will be unavailable");
            (Arc::new(InMemoryDocumentStore::default()), false)
        };

        let blog = match &config.blog.base_url {
            Some(_) => Some(BlogClient::from_config(&config.blog)?.with_default_locale(default_locale.clone())),
            None => None,
        };

        let storage = if config.file_storage.is_configured() {
            Some(FileStorageClient::from_config(&config.file_storage)?)
        } else {
            None
        };

        let dictionary = match &config.dictionary.data_path {
            Some(path) => Dictionary::from_file(path)?,
            None => {
                warn!("No dictionary data configured");
                Dictionary::default()
            }
        };

        Ok(Self {
            resolver: LocalizedContentResolver::new(store).with_default_locale(default_locale.clone()),
            blog,
            storage,
            dictionary,
            renderer: BlockRenderer::new(&config.render),
            cms_enabled,
            default_locale,
            supported_locales,
        })
    }

    /// State over an explicit document store and glossary
    pub fn with_store(store: Arc<dyn DocumentStore>, dictionary: Dictionary, config: &SiteConfig) -> Result<Self> {
        let (default_locale, supported_locales) = locales(config)?;
        Ok(Self {
            resolver: LocalizedContentResolver::new(store).with_default_locale(default_locale.clone()),
            blog: None,
            storage: None,
            dictionary,
            renderer: BlockRenderer::new(&config.render),
            cms_enabled: false,
            default_locale,
            supported_locales,
        })
    }
}

fn locales(config: &SiteConfig) -> Result<(LocaleTag, Vec<LocaleTag>)> {
    let default_locale = LocaleTag::new(config.locale.default_locale.as_str())?;
    let supported_locales = config
        .locale
        .supported_locales
        .iter()
        .map(|locale| LocaleTag::new(locale.as_str()))
        .collect::<advocacy_site_core::Result<Vec<_>>>()?;
    Ok((default_locale, supported_locales))
}
