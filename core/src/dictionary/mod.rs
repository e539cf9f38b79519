//! Dictionary search engine
//!
//! The glossary is loaded once and never changes afterwards. Searching is a
//! pure, synchronous pass over the loaded entries that returns borrowed hits,
//! so the full collection and the filtered view are independent views over
//! the same data.
//!
//! ## Submodules
//! - **`search`**: the two-stage filter and [`MatchMode`].
//! - **`state`**: [`SearchState`] and its transitions.
//! - **`alphabet`**: letters offered for each display language.
//! - **`loader`**: parsing and validation of the static data set.

pub mod alphabet;
pub mod loader;
pub mod search;
pub mod state;

pub use alphabet::alphabet;
pub use search::{filter_dictionary, MatchMode};
pub use state::SearchState;

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::messages;
use crate::models::DictionaryEntry;

/// The loaded glossary
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

/// Result of applying a search state
#[derive(Debug, Serialize)]
pub struct SearchOutcome<'a> {
    /// Entries passing both filter stages, in collection order
    pub entries: Vec<&'a DictionaryEntry>,

    /// Number of entries in the full collection
    pub total: usize,

    /// Guidance shown when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl Dictionary {
    /// Wrap already validated entries
    pub fn new(entries: Vec<DictionaryEntry>) -> Result<Self> {
        loader::validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// Load the data set at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            entries: loader::load_entries_from_file(path)?,
        })
    }

    /// Full collection
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a search state
    pub fn search(&self, state: &SearchState) -> SearchOutcome<'_> {
        let entries = state.apply(&self.entries);
        let message = if entries.is_empty() {
            Some(messages::empty_result_message(state.match_mode, state.language))
        } else {
            None
        };

        SearchOutcome {
            entries,
            total: self.entries.len(),
            message,
        }
    }
}
