//! Locale tags and display languages
//!
//! A [`LocaleTag`] is an opaque language identifier used to select content.
//! Only exact string comparison is performed; there is no negotiation between
//! tags beyond the single designated default.
//!
//! [`Language`] is the closed set of display languages the UI supports, used
//! where behavior differs per script (dictionary alphabets, messages).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Tag of the English locale
pub const ENGLISH: &str = "en";

/// Tag of the Nepali locale
pub const NEPALI: &str = "ne";

/// The locale content falls back to when a translation is missing
pub const DEFAULT_LOCALE: &str = ENGLISH;

/// Opaque language identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Create a locale tag, rejecting empty input
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(CoreError::InvalidInput("locale must not be empty".to_string()));
        }
        Ok(Self(tag))
    }

    /// The default locale (`en`)
    pub fn default_locale() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }

    /// Whether this is exactly the default locale
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LOCALE
    }

    /// Whether this tag is one of the two canonical tags
    pub fn is_canonical(&self) -> bool {
        self.0 == ENGLISH || self.0 == NEPALI
    }

    /// Borrow the tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display language of the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,

    /// Nepali
    Ne,
}

impl Language {
    /// Locale tag string of this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => ENGLISH,
            Language::Ne => NEPALI,
        }
    }

    /// Map a locale tag onto a display language; unknown tags display in English
    pub fn from_locale(locale: &LocaleTag) -> Self {
        match locale.as_str() {
            NEPALI => Language::Ne,
            _ => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ENGLISH => Ok(Language::En),
            NEPALI => Ok(Language::Ne),
            other => Err(CoreError::InvalidInput(format!("unsupported display language: {}", other))),
        }
    }
}
