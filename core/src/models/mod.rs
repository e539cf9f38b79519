//! Data models for the advocacy site
//!
//! This module provides the data structures read from upstream sources:
//! content documents from the document store and glossary entries from the
//! dictionary data set.

mod content;
mod dictionary;

pub use content::{AssetRef, AuthorRef, ContentBlock, ContentDocument, ImageRef, Span, Title};
pub use dictionary::DictionaryEntry;
