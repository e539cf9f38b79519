//! Bulk loading of the dictionary data set
//!
//! The data set is a JSON array of entries loaded once at start-up. Loading
//! fails if any entry breaks the required-terms invariant, naming the first
//! offending position.

use std::path::Path;

use log::{debug, info};

use crate::error::{CoreError, Result};
use crate::models::DictionaryEntry;

/// Parse and validate a JSON array of entries
pub fn load_entries_from_str(json: &str) -> Result<Vec<DictionaryEntry>> {
    let entries: Vec<DictionaryEntry> = serde_json::from_str(json)?;
    validate_entries(&entries)?;
    debug!("Parsed {} dictionary entries", entries.len());
    Ok(entries)
}

/// Read, parse and validate the data set at `path`
pub fn load_entries_from_file(path: impl AsRef<Path>) -> Result<Vec<DictionaryEntry>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let entries = load_entries_from_str(&json)?;
    info!("Loaded {} dictionary entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Check that every entry carries both terms
pub fn validate_entries(entries: &[DictionaryEntry]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.english.trim().is_empty() {
            return Err(CoreError::InvalidData(format!("entry {} has an empty english term", index)));
        }
        if entry.nepali.trim().is_empty() {
            return Err(CoreError::InvalidData(format!("entry {} has an empty nepali term", index)));
        }
    }
    Ok(())
}
