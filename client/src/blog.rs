//! Legacy blog REST client
//!
//! Posts come from the blog's REST API at `{base}/wp-json/wp/v2/posts`.
//! Localized posts follow the blog's own slug convention: a translated post
//! is published under `"{slug}-{locale}"`.

use std::time::Duration;

use advocacy_site_core::config::BlogConfig;
use advocacy_site_core::utils::StringUtils;
use advocacy_site_core::LocaleTag;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{server_error, ClientError, Result};

/// Server-rendered HTML field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    /// Rendered HTML
    pub rendered: String,
}

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Post ID
    pub id: u64,

    /// Post slug
    pub slug: String,

    /// Publication date, in the blog's local time
    pub date: NaiveDateTime,

    /// Title
    pub title: Rendered,

    /// Body
    pub content: Rendered,

    /// Excerpt
    #[serde(default)]
    pub excerpt: Option<Rendered>,

    /// Permalink
    #[serde(default)]
    pub link: Option<String>,
}

impl BlogPost {
    /// Title without markup, for listings
    pub fn plain_title(&self) -> String {
        StringUtils::decode_basic_entities(&StringUtils::strip_tags(&self.title.rendered))
    }
}

/// Client for the legacy blog
#[derive(Debug, Clone)]
pub struct BlogClient {
    /// Site root of the blog
    base_url: String,

    /// HTTP client
    client: Client,

    /// Timeout for requests
    timeout: Duration,

    /// Locale posts are written in when untranslated
    default_locale: LocaleTag,
}

impl BlogClient {
    /// Create a client for the blog at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: BlogConfig::default().timeout(),
            default_locale: LocaleTag::default_locale(),
        }
    }

    /// Set the locale of untranslated posts
    pub fn with_default_locale(mut self, default_locale: LocaleTag) -> Self {
        self.default_locale = default_locale;
        self
    }

    /// Create a client from configuration; the base URL is required
    pub fn from_config(config: &BlogConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::Config("blog.base_url is not set".to_string()))?;

        let mut client = Self::new(base_url);
        client.set_timeout(config.timeout());
        Ok(client)
    }

    /// Set the timeout for requests
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn posts_url(&self) -> String {
        format!("{}/wp-json/wp/v2/posts", self.base_url)
    }

    async fn get_posts(&self, params: &[(&str, String)]) -> Result<Vec<BlogPost>> {
        let response = self
            .client
            .get(self.posts_url())
            .query(params)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch the post published under exactly `slug`
    pub async fn fetch_post(&self, slug: &str) -> Result<Option<BlogPost>> {
        debug!("Fetching blog post {}", slug);
        let posts = self.get_posts(&[("slug", slug.to_string())]).await?;
        Ok(posts.into_iter().next())
    }

    /// Slugs tried for `slug` in `locale`, in order
    pub fn candidate_slugs(&self, locale: &LocaleTag, slug: &str) -> Vec<String> {
        if locale == &self.default_locale {
            vec![slug.to_string()]
        } else {
            vec![format!("{}-{}", slug, locale), slug.to_string()]
        }
    }

    /// Fetch the post for `slug` in `locale`, falling back to the untranslated post
    pub async fn fetch_localized_post(&self, locale: &LocaleTag, slug: &str) -> Result<BlogPost> {
        if StringUtils::is_blank(slug) {
            return Err(ClientError::InvalidInput("slug must not be empty".to_string()));
        }

        for candidate in self.candidate_slugs(locale, slug) {
            match self.fetch_post(&candidate).await {
                Ok(Some(post)) => return Ok(post),
                Ok(None) => debug!("No blog post under {}", candidate),
                Err(e) => warn!("Fetching blog post {} failed: {}", candidate, e),
            }
        }

        Err(ClientError::NotFound {
            slug: slug.to_string(),
            locale: locale.to_string(),
        })
    }

    /// Most recent posts, newest first
    pub async fn recent_posts(&self, count: u32) -> Result<Vec<BlogPost>> {
        self.get_posts(&[("per_page", count.to_string())]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const POST: &str = r#"[{
        "id": 42,
        "slug": "pride-2024-ne",
        "date": "2024-06-01T10:30:00",
        "title": {"rendered": "Pride &#8211; <em>2024</em>"},
        "content": {"rendered": "<p>Body</p>"},
        "excerpt": {"rendered": "<p>Short</p>"},
        "link": "https://blog.example.org/pride-2024-ne/"
    }]"#;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::new(s).unwrap()
    }

    #[test]
    fn test_candidate_slugs() {
        let client = BlogClient::new("https://blog.example.org");
        assert_eq!(client.candidate_slugs(&tag("en"), "pride"), vec!["pride"]);
        assert_eq!(client.candidate_slugs(&tag("ne"), "pride"), vec!["pride-ne", "pride"]);

        let client = client.with_default_locale(tag("ne"));
        assert_eq!(client.candidate_slugs(&tag("ne"), "pride"), vec!["pride"]);
        assert_eq!(client.candidate_slugs(&tag("en"), "pride"), vec!["pride-en", "pride"]);
    }

    #[test]
    fn test_plain_title() {
        let posts: Vec<BlogPost> = serde_json::from_str(POST).unwrap();
        assert_eq!(posts[0].plain_title(), "Pride \u{2013} 2024");
        assert_eq!(posts[0].content.rendered, "<p>Body</p>");
    }

    #[tokio::test]
    async fn test_fetch_post() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("slug".into(), "pride-2024-ne".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(POST)
            .create_async()
            .await;

        let client = BlogClient::new(&server.url());
        let post = client.fetch_post("pride-2024-ne").await.unwrap().unwrap();

        assert_eq!(post.id, 42);
        assert_eq!(post.date.to_string(), "2024-06-01 10:30:00");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_localized_post_uses_suffixed_slug_first() {
        let mut server = mockito::Server::new_async().await;
        let suffixed = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("slug".into(), "pride-2024-ne".into()))
            .with_status(200)
            .with_body(POST)
            .create_async()
            .await;
        let bare = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("slug".into(), "pride-2024".into()))
            .expect(0)
            .create_async()
            .await;

        let client = BlogClient::new(&server.url());
        let post = client.fetch_localized_post(&tag("ne"), "pride-2024").await.unwrap();

        assert_eq!(post.slug, "pride-2024-ne");
        suffixed.assert_async().await;
        bare.assert_async().await;
    }

    #[tokio::test]
    async fn test_localized_post_falls_back_after_error() {
        let mut server = mockito::Server::new_async().await;
        let _suffixed = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("slug".into(), "pride-2024-ne".into()))
            .with_status(502)
            .create_async()
            .await;
        let _bare = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("slug".into(), "pride-2024".into()))
            .with_status(200)
            .with_body(POST)
            .create_async()
            .await;

        let client = BlogClient::new(&server.url());
        let post = client.fetch_localized_post(&tag("ne"), "pride-2024").await.unwrap();
        assert_eq!(post.id, 42);
    }

    #[tokio::test]
    async fn test_localized_post_not_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let client = BlogClient::new(&server.url());
        let err = client.fetch_localized_post(&tag("ne"), "missing").await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recent_posts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/wp-json/wp/v2/posts")
            .match_query(Matcher::UrlEncoded("per_page".into(), "5".into()))
            .with_status(200)
            .with_body(POST)
            .create_async()
            .await;

        let client = BlogClient::new(&server.url());
        assert_eq!(client.recent_posts(5).await.unwrap().len(), 1);
    }
}
