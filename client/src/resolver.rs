//! Localized content resolution
//!
//! Content in the document store follows three addressing conventions at once:
//! documents tagged with a `language` field, documents whose slug carries a
//! `-{locale}` suffix, and untagged documents. The resolver tries them as an
//! ordered list of tiers and returns the first document found.
//!
//! Tiers for `(locale, base_slug)`:
//!
//! | # | Tier            | Query                                          |
//! |---|-----------------|------------------------------------------------|
//! | 1 | structured      | `slug == base_slug && language == locale`      |
//! | 2 | suffixed slug   | `slug == "{base_slug}-{locale}"`               |
//! | 3 | default locale  | `slug == base_slug && language == default`     |
//! | 4 | bare slug       | `slug == base_slug`                            |
//!
//! The default locale is `en` unless the resolver is built with another one.
//! Tier 3 is planned only when `locale` is not the default. A failing query
//! counts as a missed tier; it is logged and the next tier runs.

use std::sync::Arc;

use advocacy_site_core::{ContentDocument, LocaleTag};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::store::{DocumentQuery, DocumentStore};

/// Addressing strategy of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    /// Slug and language field both match
    Structured,

    /// Slug carries the locale as a suffix
    SuffixedSlug,

    /// Default-locale translation of the slug
    DefaultLocale,

    /// Slug alone, any language
    BareSlug,
}

impl TierKind {
    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            TierKind::Structured => "structured",
            TierKind::SuffixedSlug => "suffixed-slug",
            TierKind::DefaultLocale => "default-locale",
            TierKind::BareSlug => "bare-slug",
        }
    }
}

/// One planned attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// Addressing strategy
    pub kind: TierKind,

    /// Query issued for the attempt
    pub query: DocumentQuery,
}

/// Plan the tiers for a locale and base slug, in evaluation order
pub fn plan_tiers(locale: &LocaleTag, base_slug: &str, default_locale: &LocaleTag) -> Vec<Tier> {
    let mut tiers = vec![
        Tier {
            kind: TierKind::Structured,
            query: DocumentQuery::by_slug_and_language(base_slug, locale.clone()),
        },
        Tier {
            kind: TierKind::SuffixedSlug,
            query: DocumentQuery::by_slug(format!("{}-{}", base_slug, locale)),
        },
    ];

    if locale != default_locale {
        tiers.push(Tier {
            kind: TierKind::DefaultLocale,
            query: DocumentQuery::by_slug_and_language(base_slug, default_locale.clone()),
        });
    }

    tiers.push(Tier {
        kind: TierKind::BareSlug,
        query: DocumentQuery::by_slug(base_slug),
    });

    tiers
}

/// Resolves a locale and base slug to the best available document
#[derive(Clone)]
pub struct LocalizedContentResolver {
    store: Arc<dyn DocumentStore>,
    default_locale: LocaleTag,
}

impl LocalizedContentResolver {
    /// Create a resolver over a document store, falling back to `en`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            default_locale: LocaleTag::default_locale(),
        }
    }

    /// Set the locale of the fallback tier
    pub fn with_default_locale(mut self, default_locale: LocaleTag) -> Self {
        self.default_locale = default_locale;
        self
    }

    /// Locale of the fallback tier
    pub fn default_locale(&self) -> &LocaleTag {
        &self.default_locale
    }

    /// Resolve `base_slug` for `locale`
    ///
    /// Fails fast with [`ClientError::InvalidInput`] on an empty slug, without
    /// querying the store. Returns [`ClientError::NotFound`] once every tier
    /// has missed.
    pub async fn resolve(&self, locale: &LocaleTag, base_slug: &str) -> Result<ContentDocument> {
        if base_slug.trim().is_empty() {
            return Err(ClientError::InvalidInput("slug must not be empty".to_string()));
        }

        for tier in plan_tiers(locale, base_slug, &self.default_locale) {
            debug!(tier = tier.kind.label(), query = %tier.query, "Trying content tier");

            match self.store.fetch_one(&tier.query).await {
                Ok(Some(document)) => {
                    debug!(tier = tier.kind.label(), slug = %document.slug, "Resolved content");
                    return Ok(document);
                }
                Ok(None) => {
                    debug!(tier = tier.kind.label(), "No document for tier");
                }
                Err(e) => {
                    warn!(tier = tier.kind.label(), error = %e, "Content tier failed, falling through");
                }
            }
        }

        info!(slug = base_slug, locale = %locale, "Content not found in any tier");
        Err(ClientError::NotFound {
            slug: base_slug.to_string(),
            locale: locale.to_string(),
        })
    }

    /// Resolve independent items concurrently, one result per request in order
    pub async fn resolve_all(&self, requests: &[(LocaleTag, String)]) -> Vec<Result<ContentDocument>> {
        join_all(
            requests
                .iter()
                .map(|(locale, slug)| self.resolve(locale, slug)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryDocumentStore, MockDocumentStore};

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::new(s).unwrap()
    }

    fn doc(slug: &str, language: Option<&str>, title: &str) -> ContentDocument {
        ContentDocument::new(slug, language.map(tag), title)
    }

    fn resolver_over(store: Arc<InMemoryDocumentStore>) -> LocalizedContentResolver {
        LocalizedContentResolver::new(store)
    }

    #[test]
    fn test_plan_for_non_default_locale() {
        let tiers = plan_tiers(&tag("ne"), "about", &tag("en"));
        let kinds: Vec<TierKind> = tiers.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TierKind::Structured,
                TierKind::SuffixedSlug,
                TierKind::DefaultLocale,
                TierKind::BareSlug
            ]
        );
        assert_eq!(tiers[1].query, DocumentQuery::by_slug("about-ne"));
        assert_eq!(tiers[2].query, DocumentQuery::by_slug_and_language("about", tag("en")));
    }

    #[test]
    fn test_plan_for_default_locale_skips_fallback() {
        let tiers = plan_tiers(&tag("en"), "about", &tag("en"));
        assert_eq!(tiers.len(), 3);
        assert!(tiers.iter().all(|t| t.kind != TierKind::DefaultLocale));
    }

    #[test]
    fn test_plan_for_unknown_locale_keeps_fallback() {
        let tiers = plan_tiers(&tag("fr"), "about", &tag("en"));
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[1].query.slug, "about-fr");
    }

    #[test]
    fn test_plan_with_configured_default() {
        let tiers = plan_tiers(&tag("en"), "about", &tag("ne"));
        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[2].query, DocumentQuery::by_slug_and_language("about", tag("ne")));

        assert_eq!(plan_tiers(&tag("ne"), "about", &tag("ne")).len(), 3);
    }

    #[tokio::test]
    async fn test_configured_default_locale_is_the_fallback() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![
            doc("about", Some("en"), "english"),
            doc("about", Some("ne"), "nepali"),
        ]));
        let resolver = LocalizedContentResolver::new(store.clone()).with_default_locale(tag("ne"));

        let document = resolver.resolve(&tag("fr"), "about").await.unwrap();
        assert_eq!(document.title.plain_text(), "nepali");
        assert_eq!(store.queries().await[2], DocumentQuery::by_slug_and_language("about", tag("ne")));

        resolver.resolve(&tag("ne"), "missing").await.unwrap_err();
        assert_eq!(store.queries().await.len(), 3 + 3);
    }

    #[tokio::test]
    async fn test_structured_match_wins_over_bare_slug() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![
            doc("about", None, "bare"),
            doc("about", Some("ne"), "structured"),
        ]));
        let resolver = resolver_over(store.clone());

        let document = resolver.resolve(&tag("ne"), "about").await.unwrap();

        assert_eq!(document.title.plain_text(), "structured");
        assert_eq!(store.queries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_suffixed_slug_tier() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![
            doc("about-ne", None, "suffixed"),
            doc("about", Some("en"), "english"),
        ]));
        let document = resolver_over(store.clone()).resolve(&tag("ne"), "about").await.unwrap();

        assert_eq!(document.title.plain_text(), "suffixed");
        assert_eq!(store.queries().await.len(), 2);
    }

    #[tokio::test]
    async fn test_english_fallback_tier() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![
            doc("about", None, "bare"),
            doc("about", Some("en"), "english"),
        ]));
        let document = resolver_over(store.clone()).resolve(&tag("ne"), "about").await.unwrap();

        assert_eq!(document.title.plain_text(), "english");
        assert_eq!(store.queries().await.len(), 3);
    }

    #[tokio::test]
    async fn test_default_locale_never_queries_fallback_tier() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![doc("about", None, "bare")]));
        let document = resolver_over(store.clone()).resolve(&tag("en"), "about").await.unwrap();

        assert_eq!(document.title.plain_text(), "bare");
        let queries = store.queries().await;
        assert_eq!(
            queries,
            vec![
                DocumentQuery::by_slug_and_language("about", tag("en")),
                DocumentQuery::by_slug("about-en"),
                DocumentQuery::by_slug("about"),
            ]
        );
    }

    #[tokio::test]
    async fn test_not_found_after_all_tiers() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![doc("contact", Some("ne"), "x")]));
        let err = resolver_over(store.clone()).resolve(&tag("ne"), "about").await.unwrap_err();

        match err {
            ClientError::NotFound { slug, locale } => {
                assert_eq!(slug, "about");
                assert_eq!(locale, "ne");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(store.queries().await.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_slug_fails_fast() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![doc("", None, "x")]));
        let err = resolver_over(store.clone()).resolve(&tag("ne"), "  ").await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert!(store.queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_transient_errors_fall_through() {
        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_one()
            .times(2)
            .returning(|query: &DocumentQuery| {
                if query.slug == "about-ne" {
                    Ok(Some(ContentDocument::new("about-ne", None, "recovered")))
                } else {
                    Err(ClientError::Server("503 - unavailable".to_string()))
                }
            });

        let resolver = LocalizedContentResolver::new(Arc::new(store));
        let document = resolver.resolve(&tag("ne"), "about").await.unwrap();
        assert_eq!(document.title.plain_text(), "recovered");
    }

    #[tokio::test]
    async fn test_failing_store_ends_in_not_found() {
        let mut store = MockDocumentStore::new();
        store
            .expect_fetch_one()
            .times(4)
            .returning(|_: &DocumentQuery| Err(ClientError::Server("timeout".to_string())));

        let resolver = LocalizedContentResolver::new(Arc::new(store));
        let err = resolver.resolve(&tag("ne"), "about").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_request_order() {
        let store = Arc::new(InMemoryDocumentStore::recording(vec![
            doc("about", Some("ne"), "about"),
            doc("events", None, "events"),
        ]));
        let resolver = resolver_over(store);

        let results = resolver
            .resolve_all(&[
                (tag("ne"), "events".to_string()),
                (tag("ne"), "missing".to_string()),
                (tag("ne"), "about".to_string()),
            ])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().title.plain_text(), "events");
        assert!(matches!(results[1], Err(ClientError::NotFound { .. })));
        assert_eq!(results[2].as_ref().unwrap().title.plain_text(), "about");
    }
}
