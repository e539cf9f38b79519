//! String utility functions
//!
//! This module provides the text helpers used by the renderer and by the
//! clients that pass upstream HTML through to listings.

/// String utility functions
#[derive(Debug)]
pub struct StringUtils;

impl StringUtils {
    /// Truncate a string to at most `max_chars` characters with ellipsis
    ///
    /// Counts characters, not bytes, so Devanagari text is never split inside
    /// a code point.
    pub fn truncate(s: &str, max_chars: usize) -> String {
        match s.char_indices().nth(max_chars) {
            None => s.to_string(),
            Some((byte_index, _)) => {
                let mut result = s[..byte_index].to_string();
                result.push_str("...");
                result
            }
        }
    }

    /// Whether a string is empty or only whitespace
    pub fn is_blank(s: &str) -> bool {
        s.trim().is_empty()
    }

    /// Escape text for inclusion in HTML element content or attribute values
    pub fn escape_html(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other),
            }
        }
        escaped
    }

    /// Remove HTML tags, keeping the text between them
    pub fn strip_tags(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut in_tag = false;
        for c in s.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                other if !in_tag => result.push(other),
                _ => {}
            }
        }
        result
    }

    /// Decode the handful of entities blog platforms emit in rendered titles
    pub fn decode_basic_entities(s: &str) -> String {
        const ENTITIES: [(&str, &str); 9] = [
            ("&#8217;", "\u{2019}"),
            ("&#8216;", "\u{2018}"),
            ("&#8220;", "\u{201C}"),
            ("&#8221;", "\u{201D}"),
            ("&#8211;", "\u{2013}"),
            ("&#038;", "&"),
            ("&quot;", "\""),
            ("&#39;", "'"),
            ("&nbsp;", " "),
        ];

        let mut decoded = s.to_string();
        for (entity, replacement) in ENTITIES {
            decoded = decoded.replace(entity, replacement);
        }
        // Last, so "&amp;lt;" stays literal
        decoded.replace("&amp;", "&")
    }
}
