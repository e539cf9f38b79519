//! Configuration loading for the web service
//!
//! Settings are layered: built-in defaults, then an optional JSON/TOML/YAML
//! file, then `SITE__*` environment variables (`SITE__CMS__BASE_URL`,
//! `SITE__FILE_STORAGE__DRIVE_ID`, ...). Command-line flags are applied on
//! top by `main`.

use std::path::Path;

use advocacy_site_core::config::SiteConfig;
use ::config::{Config, Environment, File};

use crate::error::{Result, WebError};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SITE";

/// Load the site configuration
pub fn load(path: Option<&Path>) -> Result<SiteConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config: SiteConfig = builder
        .build()
        .and_then(|settings| settings.try_deserialize())
        .map_err(|e| WebError::Config(e.to_string()))?;

    config
        .validate()
        .map_err(|e| WebError::Config(e.to_string()))?;

    Ok(config)
}
