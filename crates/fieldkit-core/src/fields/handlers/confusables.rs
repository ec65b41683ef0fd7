//! OCR-confusable glyph tables and the correction pass that consumes them.
//!
//! Every pattern that expects a digit or a date separator builds its
//! character classes from these tables, and every correction goes through
//! [`correct_digits`], so the set of accepted glyphs and the set of corrected
//! glyphs cannot drift apart.

/// A true character and the glyphs OCR commonly produces in its place.
#[derive(Debug, Clone, Copy)]
pub struct Confusion {
    /// The character the glyphs stand for.
    pub canonical: char,
    /// Glyphs read by OCR instead of `canonical`.
    pub glyphs: &'static [char],
}

/// Letters misread for digits.
pub const DIGIT_CONFUSIONS: &[Confusion] = &[
    Confusion { canonical: '1', glyphs: &['I', 'l'] },
    Confusion { canonical: '0', glyphs: &['o', 'O'] },
];

/// Glyphs misread for the `/` date separator. `-` is a legitimate separator
/// that is normalized the same way.
pub const SEPARATOR_CONFUSION: Confusion = Confusion {
    canonical: '/',
    glyphs: &['1', 'I', 'l', '-'],
};

/// Regex character class matching a digit or any glyph confusable with one.
pub fn digit_class() -> String {
    let mut class = String::from("[0-9");
    for confusion in DIGIT_CONFUSIONS {
        for glyph in confusion.glyphs {
            class.push_str(&regex::escape(&glyph.to_string()));
        }
    }
    class.push(']');
    class
}

/// Regex character class matching the date separator or a confusable glyph.
pub fn separator_class() -> String {
    let mut class = String::from("[");
    class.push_str(&regex::escape(&SEPARATOR_CONFUSION.canonical.to_string()));
    for glyph in SEPARATOR_CONFUSION.glyphs {
        class.push_str(&regex::escape(&glyph.to_string()));
    }
    class.push(']');
    class
}

/// Replace every digit-confusable glyph with the digit it stands for.
pub fn correct_digits(text: &str) -> String {
    text.chars().map(correct_digit).collect()
}

fn correct_digit(c: char) -> char {
    DIGIT_CONFUSIONS
        .iter()
        .find(|confusion| confusion.glyphs.contains(&c))
        .map(|confusion| confusion.canonical)
        .unwrap_or(c)
}

/// Join date components with the canonical separator and correct their
/// digits.
pub fn join_corrected(parts: &[&str]) -> String {
    let separator = SEPARATOR_CONFUSION.canonical.to_string();
    correct_digits(&parts.join(&separator))
}
