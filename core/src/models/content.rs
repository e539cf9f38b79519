//! Publishable content documents
//!
//! This module provides the data structures for content read from the
//! document store: the document itself, its title, and the typed block tree
//! that makes up its body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::locale::LocaleTag;

/// One unit of publishable content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Store identifier
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Slug, unique within a language
    pub slug: String,

    /// Language the document is written in (untagged documents have none)
    #[serde(default)]
    pub language: Option<LocaleTag>,

    /// Document title
    pub title: Title,

    /// Rich-content body
    #[serde(default, deserialize_with = "deserialize_body")]
    pub body: Vec<ContentBlock>,

    /// Main image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<ImageRef>,

    /// Author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,

    /// Short summary used by listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Publication time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentDocument {
    /// Create a document with a plain title and an empty body
    pub fn new(slug: impl Into<String>, language: Option<LocaleTag>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            language,
            title: Title::Plain(title.into()),
            body: Vec::new(),
            main_image: None,
            author: None,
            excerpt: None,
            published_at: None,
        }
    }

    /// Set the body
    pub fn with_body(mut self, body: Vec<ContentBlock>) -> Self {
        self.body = body;
        self
    }
}

/// Document title, either a plain string or a run of rich-text spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Title {
    /// Plain string
    Plain(String),

    /// Rich text
    Rich(Vec<Span>),
}

impl Title {
    /// Title text without markup
    pub fn plain_text(&self) -> String {
        match self {
            Title::Plain(text) => text.clone(),
            Title::Rich(spans) => spans.iter().map(|span| span.text.as_str()).collect(),
        }
    }
}

/// A run of inline text with its marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Text content
    pub text: String,

    /// Marks applied to the text (`strong`, `em`, `code`, `underline`)
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Span {
    /// Unmarked text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Text with marks
    pub fn marked(text: impl Into<String>, marks: &[&str]) -> Self {
        Self {
            text: text.into(),
            marks: marks.iter().map(|mark| mark.to_string()).collect(),
        }
    }
}

/// Typed block of the rich-content tree
///
/// The set of block types is open upstream; anything not listed here
/// deserializes to [`ContentBlock::Unknown`]. Portable-text `block` entries
/// sent by the CMS are mapped onto these variants by [`normalize_body`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Paragraph of inline spans
    Paragraph {
        /// Inline content
        #[serde(default)]
        children: Vec<Span>,
    },

    /// Section heading
    Heading {
        /// Heading level, 1 to 6
        #[serde(default = "default_heading_level")]
        level: u8,

        /// Inline content
        #[serde(default)]
        children: Vec<Span>,
    },

    /// Embedded image
    Image {
        /// Asset reference; missing until the upload completes
        #[serde(default)]
        asset: Option<AssetRef>,

        /// Alternative text
        #[serde(default)]
        alt: Option<String>,

        /// Caption shown below the image
        #[serde(default)]
        caption: Option<String>,
    },

    /// Bulleted or numbered list
    List {
        /// Numbered when true
        #[serde(default)]
        ordered: bool,

        /// One run of spans per item
        #[serde(default)]
        items: Vec<Vec<Span>>,
    },

    /// Block quotation
    Quote {
        /// Quoted text
        #[serde(default)]
        children: Vec<Span>,

        /// Who is quoted
        #[serde(default)]
        attribution: Option<String>,
    },

    /// Block type this version does not know about
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    /// Type name used for render dispatch
    pub fn block_type(&self) -> &'static str {
        match self {
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Image { .. } => "image",
            ContentBlock::List { .. } => "list",
            ContentBlock::Quote { .. } => "quote",
            ContentBlock::Unknown => "unknown",
        }
    }
}

fn default_heading_level() -> u8 {
    2
}

/// Portable-text block: a run of spans with a paragraph style or list marker
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextBlock {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    list_item: Option<String>,
    #[serde(default)]
    children: Vec<Span>,
}

fn deserialize_body<'de, D>(deserializer: D) -> std::result::Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(normalize_body(raw.unwrap_or_default()))
}

/// Convert raw body entries into blocks
///
/// `block` entries become paragraphs, headings (`h1`..`h6`), quotes
/// (`blockquote`) or list items; consecutive list items of the same kind are
/// grouped into one [`ContentBlock::List`]. An entry that does not fit its
/// declared type becomes [`ContentBlock::Unknown`] so the rest of the
/// document still loads.
pub fn normalize_body(raw: Vec<Value>) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = Vec::with_capacity(raw.len());

    for value in raw {
        let is_text_block = value.get("_type").and_then(Value::as_str) == Some("block");
        if !is_text_block {
            let block = serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Skipping malformed content block: {}", e);
                ContentBlock::Unknown
            });
            blocks.push(block);
            continue;
        }

        let text: TextBlock = match serde_json::from_value(value) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Skipping malformed text block: {}", e);
                blocks.push(ContentBlock::Unknown);
                continue;
            }
        };

        if let Some(marker) = text.list_item {
            let ordered = marker == "number";
            match blocks.last_mut() {
                Some(ContentBlock::List { ordered: last, items }) if *last == ordered => {
                    items.push(text.children)
                }
                _ => blocks.push(ContentBlock::List {
                    ordered,
                    items: vec![text.children],
                }),
            }
            continue;
        }

        let block = match text.style.as_deref() {
            Some("blockquote") => ContentBlock::Quote {
                children: text.children,
                attribution: None,
            },
            Some(style) => match heading_level(style) {
                Some(level) => ContentBlock::Heading {
                    level,
                    children: text.children,
                },
                None => ContentBlock::Paragraph {
                    children: text.children,
                },
            },
            None => ContentBlock::Paragraph {
                children: text.children,
            },
        };
        blocks.push(block);
    }

    blocks
}

fn heading_level(style: &str) -> Option<u8> {
    match style.strip_prefix('h')?.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

/// Reference to a stored asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset identifier
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// Image reference with optional alternative text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Asset reference; missing until the upload completes
    #[serde(default)]
    pub asset: Option<AssetRef>,

    /// Alternative text
    #[serde(default)]
    pub alt: Option<String>,
}

/// Author of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Display name
    pub name: String,

    /// Author slug
    #[serde(default)]
    pub slug: Option<String>,
}
