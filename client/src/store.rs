//! Document store abstraction
//!
//! A [`DocumentStore`] answers one structured query at a time with zero or
//! one document. `Ok(None)` means nothing matched; `Err` means the query
//! itself failed. The resolver treats both as a failed attempt.

use std::fmt;
use std::path::Path;

use advocacy_site_core::{ContentDocument, LocaleTag};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;

/// Structured query against the document store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentQuery {
    /// Exact slug
    pub slug: String,

    /// Exact language, or any language when `None`
    pub language: Option<LocaleTag>,
}

impl DocumentQuery {
    /// Match on slug only
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            language: None,
        }
    }

    /// Match on slug and language
    pub fn by_slug_and_language(slug: impl Into<String>, language: LocaleTag) -> Self {
        Self {
            slug: slug.into(),
            language: Some(language),
        }
    }

    /// Whether a document satisfies this query
    pub fn matches(&self, document: &ContentDocument) -> bool {
        if document.slug != self.slug {
            return false;
        }
        match &self.language {
            Some(language) => document.language.as_ref() == Some(language),
            None => true,
        }
    }
}

impl fmt::Display for DocumentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(language) => write!(f, "slug == \"{}\" && language == \"{}\"", self.slug, language),
            None => write!(f, "slug == \"{}\"", self.slug),
        }
    }
}

/// Read-only source of content documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the first document matching `query`
    async fn fetch_one(&self, query: &DocumentQuery) -> Result<Option<ContentDocument>>;
}

/// Document store over a fixed set of documents
///
/// A store built with [`InMemoryDocumentStore::recording`] keeps every
/// received query for inspection with [`InMemoryDocumentStore::queries`].
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Vec<ContentDocument>,
    queries: Option<Mutex<Vec<DocumentQuery>>>,
}

impl InMemoryDocumentStore {
    /// Create a store holding `documents`, searched in order
    pub fn new(documents: Vec<ContentDocument>) -> Self {
        Self {
            documents,
            queries: None,
        }
    }

    /// Create a store that also records every query it receives
    pub fn recording(documents: Vec<ContentDocument>) -> Self {
        Self {
            documents,
            queries: Some(Mutex::new(Vec::new())),
        }
    }

    /// Load documents from a JSON array file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(advocacy_site_core::CoreError::from)?;
        let documents: Vec<ContentDocument> = serde_json::from_str(&json)?;
        tracing::info!(
            "Loaded {} content documents from {}",
            documents.len(),
            path.as_ref().display()
        );
        Ok(Self::new(documents))
    }

    /// Number of documents held
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Queries received so far, oldest first; empty unless recording
    pub async fn queries(&self) -> Vec<DocumentQuery> {
        match &self.queries {
            Some(queries) => queries.lock().await.clone(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_one(&self, query: &DocumentQuery) -> Result<Option<ContentDocument>> {
        if let Some(queries) = &self.queries {
            queries.lock().await.push(query.clone());
        }
        Ok(self
            .documents
            .iter()
            .find(|document| query.matches(document))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::new(s).unwrap()
    }

    #[test]
    fn test_query_matching() {
        let tagged = ContentDocument::new("about", Some(tag("ne")), "बारेमा");
        let untagged = ContentDocument::new("about", None, "About");

        let structured = DocumentQuery::by_slug_and_language("about", tag("ne"));
        assert!(structured.matches(&tagged));
        assert!(!structured.matches(&untagged));

        let bare = DocumentQuery::by_slug("about");
        assert!(bare.matches(&tagged));
        assert!(bare.matches(&untagged));
        assert!(!DocumentQuery::by_slug("contact").matches(&tagged));
    }

    #[test]
    fn test_query_display() {
        assert_eq!(
            DocumentQuery::by_slug_and_language("about", tag("en")).to_string(),
            "slug == \"about\" && language == \"en\""
        );
        assert_eq!(DocumentQuery::by_slug("about-ne").to_string(), "slug == \"about-ne\"");
    }

    #[tokio::test]
    async fn test_in_memory_store_records_queries() {
        let store = InMemoryDocumentStore::recording(vec![
            ContentDocument::new("about", None, "first"),
            ContentDocument::new("about", Some(tag("en")), "second"),
        ]);

        let found = store.fetch_one(&DocumentQuery::by_slug("about")).await.unwrap();
        assert_eq!(found.unwrap().title.plain_text(), "first");

        let missing = store
            .fetch_one(&DocumentQuery::by_slug_and_language("about", tag("ne")))
            .await
            .unwrap();
        assert!(missing.is_none());

        let queries = store.queries().await;
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].language, Some(tag("ne")));
    }

    #[tokio::test]
    async fn test_plain_store_keeps_no_queries() {
        let store = InMemoryDocumentStore::new(vec![ContentDocument::new("about", None, "About")]);

        for _ in 0..100 {
            store.fetch_one(&DocumentQuery::by_slug("missing")).await.unwrap();
        }

        assert!(store.queries().await.is_empty());
        assert!(store.fetch_one(&DocumentQuery::by_slug("about")).await.unwrap().is_some());
    }
}
