//! Advocacy Site - the multilingual (English/Nepali) public website core
//!
//! This is the root crate that provides workspace-level documentation.
//! Actual implementation is in the subcrates:
//! - `advocacy-site-core`: domain models, dictionary search and rich-content rendering
//! - `advocacy-site-client`: document store, content resolver, blog and file-storage clients
//! - `advocacy-site-web`: HTTP service exposing content and dictionary search

/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
