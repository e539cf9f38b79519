//! Search state of the dictionary view
//!
//! [`SearchState`] holds what the user has entered and chosen. Every
//! transition leaves the state ready to be re-applied to the full entry
//! collection with [`SearchState::apply`].

use serde::{Deserialize, Serialize};

use super::search::{filter_dictionary, MatchMode};
use crate::locale::Language;
use crate::models::DictionaryEntry;

/// Ephemeral search state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    /// Free-text query
    pub query: String,

    /// Match mode of the query
    pub match_mode: MatchMode,

    /// Active alphabet letter
    pub active_letter: Option<String>,

    /// Display language
    pub language: Language,
}

impl SearchState {
    /// Fresh state for a display language
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Replace the query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a letter, or clear it when it is already active
    pub fn toggle_letter(&mut self, letter: &str) {
        if letter.is_empty() || self.active_letter.as_deref() == Some(letter) {
            self.active_letter = None;
        } else {
            self.active_letter = Some(letter.to_string());
        }
    }

    /// Switch the display language
    ///
    /// A letter from one script means nothing in the other, so switching
    /// clears the active letter. The query is kept.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.active_letter = None;
        }
    }

    /// Switch the match mode, keeping query and letter
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.match_mode = mode;
    }

    /// Active letter, empty when none
    pub fn letter(&self) -> &str {
        self.active_letter.as_deref().unwrap_or("")
    }

    /// Filter `entries` with the current state
    pub fn apply<'a>(&self, entries: &'a [DictionaryEntry]) -> Vec<&'a DictionaryEntry> {
        filter_dictionary(entries, &self.query, self.match_mode, self.letter(), self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DictionaryEntry> {
        vec![
            DictionaryEntry::new("Ally", "सहयोगी").with_definitions("supporter", ""),
            DictionaryEntry::new("Bisexual", "द्विलिंगी").with_definitions("attraction to more than one gender", ""),
            DictionaryEntry::new("Queer", "क्वेयर").with_definitions("an umbrella term", "सहयोगी शब्द"),
        ]
    }

    #[test]
    fn test_toggle_same_letter_clears() {
        let entries = entries();
        let mut state = SearchState::new(Language::En);
        state.set_query("r");
        state.set_match_mode(MatchMode::Full);
        let untouched = state.apply(&entries);

        state.toggle_letter("B");
        assert_eq!(state.active_letter.as_deref(), Some("B"));
        assert_eq!(state.apply(&entries).len(), 1);

        state.toggle_letter("B");
        assert_eq!(state.active_letter, None);
        assert_eq!(state.apply(&entries), untouched);
        assert_eq!(state, {
            let mut fresh = SearchState::new(Language::En);
            fresh.set_query("r");
            fresh.set_match_mode(MatchMode::Full);
            fresh
        });
    }

    #[test]
    fn test_toggle_different_letter_replaces() {
        let mut state = SearchState::new(Language::En);
        state.toggle_letter("A");
        state.toggle_letter("Q");
        assert_eq!(state.letter(), "Q");
    }

    #[test]
    fn test_language_switch_clears_letter_keeps_query() {
        let entries = entries();
        let mut state = SearchState::new(Language::En);
        state.set_query("सहयोगी");
        state.set_match_mode(MatchMode::Full);
        state.toggle_letter("A");
        assert_eq!(state.apply(&entries).len(), 1);

        state.set_language(Language::Ne);

        assert_eq!(state.active_letter, None);
        assert_eq!(state.query, "सहयोगी");
        let hits: Vec<&str> = state.apply(&entries).iter().map(|e| e.english.as_str()).collect();
        assert_eq!(hits, vec!["Ally", "Queer"]);
    }

    #[test]
    fn test_same_language_keeps_letter() {
        let mut state = SearchState::new(Language::Ne);
        state.toggle_letter("स");
        state.set_language(Language::Ne);
        assert_eq!(state.letter(), "स");
    }

    #[test]
    fn test_mode_switch_reapplies_without_clearing() {
        let entries = entries();
        let mut state = SearchState::new(Language::En);
        state.set_query("term");
        state.toggle_letter("Q");
        assert!(state.apply(&entries).is_empty());

        state.set_match_mode(MatchMode::Full);

        assert_eq!(state.query, "term");
        assert_eq!(state.letter(), "Q");
        assert_eq!(state.apply(&entries).len(), 1);
    }
}
