//! User-visible fallback messages

use crate::dictionary::MatchMode;
use crate::locale::Language;

/// Shown in place of a page whose content could not be resolved
pub const CONTENT_UNAVAILABLE: &str = "Content not available";

/// "No entries found" message with guidance for the current mode
pub fn empty_result_message(mode: MatchMode, language: Language) -> &'static str {
    match (mode, language) {
        (MatchMode::Prefix, Language::En) => {
            "No entries found starting with your search. Try full-text search to look inside definitions as well."
        }
        (MatchMode::Full, Language::En) => {
            "No entries found. Try a different word or clear the letter filter."
        }
        (MatchMode::Prefix, Language::Ne) => {
            "तपाईंको खोजबाट सुरु हुने कुनै शब्द भेटिएन। परिभाषाभित्र पनि खोज्न पूर्ण खोज प्रयोग गर्नुहोस्।"
        }
        (MatchMode::Full, Language::Ne) => {
            "कुनै शब्द भेटिएन। अर्को शब्द प्रयास गर्नुहोस् वा अक्षर फिल्टर हटाउनुहोस्।"
        }
    }
}
