//! Glossary entries
//!
//! A [`DictionaryEntry`] pairs an English term with its Nepali counterpart and
//! optional explanatory fields in both languages. Optional fields may be
//! absent, `null` or empty in the source data; all three read as "not present".

use serde::{Deserialize, Serialize};

/// One glossary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Numeric key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// English term
    pub english: String,

    /// Nepali term
    pub nepali: String,

    /// English definition
    #[serde(default)]
    pub definition_en: Option<String>,

    /// Nepali definition
    #[serde(default)]
    pub definition_ne: Option<String>,

    /// English etymology
    #[serde(default)]
    pub etymology_en: Option<String>,

    /// Nepali etymology
    #[serde(default)]
    pub etymology_ne: Option<String>,

    /// English explanation
    #[serde(default)]
    pub explanation_en: Option<String>,

    /// Nepali explanation
    #[serde(default)]
    pub explanation_ne: Option<String>,
}

/// Treat `None` and `""` alike
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl DictionaryEntry {
    /// Create an entry with only the two required terms
    pub fn new(english: impl Into<String>, nepali: impl Into<String>) -> Self {
        Self {
            id: None,
            english: english.into(),
            nepali: nepali.into(),
            definition_en: None,
            definition_ne: None,
            etymology_en: None,
            etymology_ne: None,
            explanation_en: None,
            explanation_ne: None,
        }
    }

    /// Set both definitions
    pub fn with_definitions(mut self, en: impl Into<String>, ne: impl Into<String>) -> Self {
        self.definition_en = Some(en.into());
        self.definition_ne = Some(ne.into());
        self
    }

    /// English definition, if present
    pub fn definition_en(&self) -> Option<&str> {
        present(&self.definition_en)
    }

    /// Nepali definition, if present
    pub fn definition_ne(&self) -> Option<&str> {
        present(&self.definition_ne)
    }

    /// English-side searchable text fields that are present, term first
    pub fn english_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.english.as_str()).chain(
            [&self.definition_en, &self.etymology_en, &self.explanation_en]
                .into_iter()
                .filter_map(present),
        )
    }

    /// Nepali-side searchable text fields that are present, term first
    pub fn nepali_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.nepali.as_str()).chain(
            [&self.definition_ne, &self.etymology_ne, &self.explanation_ne]
                .into_iter()
                .filter_map(present),
        )
    }
}
