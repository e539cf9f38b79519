//! # Advocacy Site Core
//!
//! Core data structures and logic of the multilingual (English/Nepali) site.
//! This crate has no I/O beyond loading static files; the upstream clients
//! and the content resolver live in `advocacy-site-client`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod locale;
pub mod messages;
pub mod models;
pub mod render;
pub mod utils;

/// Re-export common types for ease of use
pub use dictionary::{filter_dictionary, Dictionary, MatchMode, SearchState};
pub use error::{CoreError, Result};
pub use locale::{Language, LocaleTag};
pub use models::{ContentBlock, ContentDocument, DictionaryEntry};
pub use render::BlockRenderer;

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
