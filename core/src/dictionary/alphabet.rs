//! Letters offered by the alphabet bar

use crate::locale::Language;

const ENGLISH_LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

// Vowels, consonants, then the three conjuncts taught as letters
const NEPALI_LETTERS: [&str; 47] = [
    "अ", "आ", "इ", "ई", "उ", "ऊ", "ऋ", "ए", "ऐ", "ओ", "औ", "क", "ख", "ग", "घ", "ङ", "च", "छ", "ज",
    "झ", "ञ", "ट", "ठ", "ड", "ढ", "ण", "त", "थ", "द", "ध", "न", "प", "फ", "ब", "भ", "म", "य", "र",
    "ल", "व", "श", "ष", "स", "ह", "क्ष", "त्र", "ज्ञ",
];

/// Alphabet of a display language, in teaching order
pub fn alphabet(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => &ENGLISH_LETTERS,
        Language::Ne => &NEPALI_LETTERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_alphabet() {
        let letters = alphabet(Language::En);
        assert_eq!(letters.len(), 26);
        assert_eq!(letters.first(), Some(&"A"));
        assert_eq!(letters.last(), Some(&"Z"));
    }

    #[test]
    fn test_nepali_alphabet() {
        let letters = alphabet(Language::Ne);
        assert_eq!(letters[0], "अ");
        assert!(letters.contains(&"क्ष"));
        assert!(letters.contains(&"ज्ञ"));
        assert!(!letters.contains(&"A"));
    }
}
