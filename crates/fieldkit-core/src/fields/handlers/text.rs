//! Casing and whitespace helpers shared by text handlers.

use super::patterns::WHITESPACE;

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// True if the text has at least one cased letter and no lower-case letters.
pub fn is_all_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Capitalize the first letter of each word and lower-case the rest.
///
/// Any non-alphabetic character ends a word, so `O'BRIEN` becomes
/// `O'Brien` and `SMITH-JONES` becomes `Smith-Jones`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = true;

    for c in text.chars() {
        if !c.is_alphabetic() {
            result.push(c);
            word_start = true;
        } else if word_start {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }

    result
}
