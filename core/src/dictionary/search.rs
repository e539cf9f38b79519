//! Dictionary filtering
//!
//! The filter runs in two fixed stages: the alphabet stage narrows entries by
//! the first letter of the term in the display language, then the query stage
//! matches the free-text query in the selected [`MatchMode`]. Entries are
//! borrowed from the input slice, so the result keeps the input order and can
//! never alter the collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::locale::Language;
use crate::models::DictionaryEntry;

/// How the query is compared against entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Term starts with the query
    #[default]
    Prefix,

    /// Query appears anywhere in the terms or their explanatory fields
    Full,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Prefix => f.write_str("prefix"),
            MatchMode::Full => f.write_str("full"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(MatchMode::Prefix),
            "full" => Ok(MatchMode::Full),
            other => Err(CoreError::InvalidInput(format!("unknown match mode: {}", other))),
        }
    }
}

/// Filter `entries` by alphabet letter and query
///
/// An empty `alphabet_filter` disables the alphabet stage; an empty or
/// whitespace-only `query` disables the query stage.
pub fn filter_dictionary<'a>(
    entries: &'a [DictionaryEntry],
    query: &str,
    mode: MatchMode,
    alphabet_filter: &str,
    language: Language,
) -> Vec<&'a DictionaryEntry> {
    let letter = LetterFilter::new(alphabet_filter, language);
    let query = QueryFilter::new(query, mode);

    entries
        .iter()
        .filter(|entry| letter.matches(entry))
        .filter(|entry| query.matches(entry))
        .collect()
}

/// Alphabet stage
struct LetterFilter<'a> {
    letter: &'a str,
    lowered: String,
    language: Language,
}

impl<'a> LetterFilter<'a> {
    fn new(letter: &'a str, language: Language) -> Self {
        Self {
            letter,
            lowered: letter.to_lowercase(),
            language,
        }
    }

    fn matches(&self, entry: &DictionaryEntry) -> bool {
        if self.letter.is_empty() {
            return true;
        }
        match self.language {
            Language::En => entry.english.to_lowercase().starts_with(&self.lowered),
            // Devanagari has no case
            Language::Ne => entry.nepali.starts_with(self.letter),
        }
    }
}

/// Query stage
struct QueryFilter<'q> {
    raw: &'q str,
    lowered: String,
    mode: MatchMode,
    active: bool,
}

impl<'q> QueryFilter<'q> {
    fn new(raw: &'q str, mode: MatchMode) -> Self {
        Self {
            raw,
            lowered: raw.to_lowercase(),
            mode,
            active: !raw.trim().is_empty(),
        }
    }

    fn matches(&self, entry: &DictionaryEntry) -> bool {
        if !self.active {
            return true;
        }
        match self.mode {
            MatchMode::Prefix => {
                entry.english.to_lowercase().starts_with(&self.lowered)
                    || entry.nepali.to_lowercase().starts_with(&self.lowered)
            }
            MatchMode::Full => {
                entry
                    .english_fields()
                    .any(|field| field.to_lowercase().contains(&self.lowered))
                    || entry.nepali_fields().any(|field| field.contains(self.raw))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Vec<DictionaryEntry> {
        let mut queer = DictionaryEntry::new("Queer", "क्वेयर").with_definitions("a term", "एक शब्द");
        queer.id = Some(1);
        let mut ally = DictionaryEntry::new("Ally", "सहयोगी")
            .with_definitions("someone who supports", "समर्थन गर्ने व्यक्ति");
        ally.etymology_en = None;
        ally.explanation_ne = Some("समुदायको साथी".to_string());
        let mut asexual = DictionaryEntry::new("Asexual", "अलैंगिक");
        asexual.etymology_en = Some("from Greek a- (without)".to_string());
        let intersex = DictionaryEntry::new("intersex", "अन्तरलिंगी")
            .with_definitions("born with variations in sex characteristics", "");
        vec![queer, ally, asexual, intersex]
    }

    fn english_terms(result: &[&DictionaryEntry]) -> Vec<String> {
        result.iter().map(|entry| entry.english.clone()).collect()
    }

    #[test]
    fn test_prefix_and_full_modes_differ() {
        let entries = vec![DictionaryEntry::new("Queer", "क्वेयर").with_definitions("a term", "")];

        assert!(filter_dictionary(&entries, "ee", MatchMode::Prefix, "", Language::En).is_empty());
        assert_eq!(filter_dictionary(&entries, "ee", MatchMode::Full, "", Language::En).len(), 1);
    }

    #[rstest]
    #[case("", MatchMode::Prefix, vec!["Queer", "Ally", "Asexual", "intersex"])]
    #[case("   ", MatchMode::Full, vec!["Queer", "Ally", "Asexual", "intersex"])]
    #[case("a", MatchMode::Prefix, vec!["Ally", "Asexual"])]
    #[case("A", MatchMode::Prefix, vec!["Ally", "Asexual"])]
    #[case("INTER", MatchMode::Prefix, vec!["intersex"])]
    #[case("सह", MatchMode::Prefix, vec!["Ally"])]
    #[case("support", MatchMode::Full, vec!["Ally"])]
    #[case("greek", MatchMode::Full, vec!["Asexual"])]
    #[case("साथी", MatchMode::Full, vec!["Ally"])]
    #[case("शब्द", MatchMode::Full, vec!["Queer"])]
    #[case("zzz", MatchMode::Full, vec![])]
    fn test_query_stage(#[case] query: &str, #[case] mode: MatchMode, #[case] expected: Vec<&str>) {
        let entries = sample();
        let result = filter_dictionary(&entries, query, mode, "", Language::En);
        assert_eq!(english_terms(&result), expected);
    }

    #[rstest]
    #[case("a", Language::En, vec!["Ally", "Asexual"])]
    #[case("I", Language::En, vec!["intersex"])]
    #[case("अ", Language::Ne, vec!["Asexual", "intersex"])]
    #[case("स", Language::Ne, vec!["Ally"])]
    #[case("", Language::Ne, vec!["Queer", "Ally", "Asexual", "intersex"])]
    fn test_alphabet_stage(#[case] letter: &str, #[case] language: Language, #[case] expected: Vec<&str>) {
        let entries = sample();
        let result = filter_dictionary(&entries, "", MatchMode::Prefix, letter, language);
        assert_eq!(english_terms(&result), expected);
    }

    #[test]
    fn test_alphabet_then_query() {
        let entries = sample();
        let result = filter_dictionary(&entries, "sex", MatchMode::Full, "a", Language::En);
        assert_eq!(english_terms(&result), vec!["Asexual"]);
    }

    #[test]
    fn test_nepali_fields_use_raw_query() {
        let entries = vec![DictionaryEntry::new("Trans", "ट्रान्स").with_definitions("", "Gender पहिचान")];

        // the raw query keeps its case against Nepali-side fields
        assert_eq!(filter_dictionary(&entries, "Gender", MatchMode::Full, "", Language::Ne).len(), 1);
        assert!(filter_dictionary(&entries, "gender", MatchMode::Full, "", Language::Ne).is_empty());
    }

    #[test]
    fn test_null_fields_are_skipped() {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(
            r#"[
                { "english": "Pride", "nepali": "गर्व", "definition_en": "celebration", "etymology_en": null },
                { "english": "Closet", "nepali": "क्लोजेट", "etymology_en": null, "explanation_ne": null }
            ]"#,
        )
        .unwrap();

        let result = filter_dictionary(&entries, "celebr", MatchMode::Full, "", Language::En);
        assert_eq!(english_terms(&result), vec!["Pride"]);

        let result = filter_dictionary(&entries, "null", MatchMode::Full, "", Language::En);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_is_pure_and_preserves_order() {
        let entries = sample();
        let before = entries.clone();

        let first = filter_dictionary(&entries, "a", MatchMode::Full, "", Language::En);
        let second = filter_dictionary(&entries, "a", MatchMode::Full, "", Language::En);

        assert_eq!(first, second);
        assert_eq!(entries, before);
        let positions: Vec<usize> = first
            .iter()
            .map(|hit| entries.iter().position(|entry| std::ptr::eq(entry, *hit)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_match_mode_parsing() {
        assert_eq!("full".parse::<MatchMode>().unwrap(), MatchMode::Full);
        assert_eq!("prefix".parse::<MatchMode>().unwrap(), MatchMode::Prefix);
        assert!("fuzzy".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::default(), MatchMode::Prefix);
    }
}
