//! Field type handling: recognize, extract and normalize typed text fields.

pub mod handlers;
pub mod registry;
pub mod similarity;

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::models::value::{FieldKind, FieldValue, StorageType};

pub use handlers::{DateHandler, HumanNameHandler, ProperNounHandler};

/// Contract every field type implements.
pub trait FieldType {
    /// Canonical value produced by [`FieldType::format`].
    type Value: PartialEq + fmt::Display;

    /// The type tag this handler serves.
    fn kind(&self) -> FieldKind;

    /// Declared storage type for schema binding.
    fn storage_type(&self) -> StorageType;

    /// Match patterns, highest confidence first.
    fn patterns(&self) -> &[&'static Regex];

    /// Clean up raw OCR text before extraction.
    fn preprocess(&self, text: &str) -> String {
        text.to_string()
    }

    /// Find the first candidate substring, trying patterns in order.
    ///
    /// Matches that are blank once trimmed are skipped.
    fn find_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        for (index, pattern) in self.patterns().iter().enumerate() {
            for m in pattern.find_iter(text) {
                let raw = m.as_str();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let start = m.start() + (raw.len() - raw.trim_start().len());
                let end = start + trimmed.len();
                return Some(
                    ExtractionMatch::new(trimmed.to_string(), trimmed, index)
                        .with_position(start, end),
                );
            }
        }
        None
    }

    /// Find the first candidate substring, trying patterns in order.
    ///
    /// A match that is blank once trimmed does not end the search: later
    /// matches of the same pattern, then later patterns, are still tried.
    fn find_value(&self, text: &str) -> Option<String> {
        self.find_match(text).map(|m| m.value)
    }

    /// Normalize a matched substring into the canonical value.
    fn format(&self, value: &str) -> Option<Self::Value>;

    /// Similarity in `[0, 1]` between a canonical query value and free text.
    fn match_score(&self, query: &Self::Value, text: &str) -> f64 {
        if text.contains(&query.to_string()) {
            1.0
        } else {
            0.0
        }
    }

    /// Symmetric similarity in `[0, 1]` between two canonical values.
    fn compare(&self, value1: &Self::Value, value2: &Self::Value) -> f64 {
        if value1 == value2 {
            1.0
        } else {
            0.0
        }
    }
}

/// A value found in text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
    /// Byte span of `source` in the searched text.
    pub position: Option<(usize, usize)>,
    /// Index of the pattern that matched.
    pub pattern: usize,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>, pattern: usize) -> Self {
        Self {
            value,
            source: source.into(),
            position: None,
            pattern,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Replace the value, keeping where it was found.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            source: self.source,
            position: self.position,
            pattern: self.pattern,
        }
    }
}

/// Closed set of field handlers, dispatched by variant.
#[derive(Debug, Clone)]
pub enum FieldHandler {
    HumanName(HumanNameHandler),
    Date(DateHandler),
    ProperNoun(ProperNounHandler),
}

impl FieldHandler {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldHandler::HumanName(h) => h.kind(),
            FieldHandler::Date(h) => h.kind(),
            FieldHandler::ProperNoun(h) => h.kind(),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            FieldHandler::HumanName(h) => h.storage_type(),
            FieldHandler::Date(h) => h.storage_type(),
            FieldHandler::ProperNoun(h) => h.storage_type(),
        }
    }

    pub fn patterns(&self) -> &[&'static Regex] {
        match self {
            FieldHandler::HumanName(h) => h.patterns(),
            FieldHandler::Date(h) => h.patterns(),
            FieldHandler::ProperNoun(h) => h.patterns(),
        }
    }

    pub fn preprocess(&self, text: &str) -> String {
        match self {
            FieldHandler::HumanName(h) => h.preprocess(text),
            FieldHandler::Date(h) => h.preprocess(text),
            FieldHandler::ProperNoun(h) => h.preprocess(text),
        }
    }

    pub fn find_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        match self {
            FieldHandler::HumanName(h) => h.find_match(text),
            FieldHandler::Date(h) => h.find_match(text),
            FieldHandler::ProperNoun(h) => h.find_match(text),
        }
    }

    pub fn find_value(&self, text: &str) -> Option<String> {
        self.find_match(text).map(|m| m.value)
    }

    pub fn format(&self, value: &str) -> Option<FieldValue> {
        match self {
            FieldHandler::HumanName(h) => h.format(value).map(FieldValue::Text),
            FieldHandler::Date(h) => h.format(value).map(FieldValue::Date),
            FieldHandler::ProperNoun(h) => h.format(value).map(FieldValue::Text),
        }
    }

    /// Score a canonical query against free text.
    ///
    /// A textual query given to the date handler is formatted first; if it
    /// does not parse the score is 0.
    pub fn match_score(&self, query: &FieldValue, text: &str) -> f64 {
        match self {
            FieldHandler::HumanName(h) => h.match_score(&query.to_string(), text),
            FieldHandler::Date(h) => match self.coerce_date(h, query) {
                Some(date) => h.match_score(&date, text),
                None => 0.0,
            },
            FieldHandler::ProperNoun(h) => h.match_score(&query.to_string(), text),
        }
    }

    pub fn compare(&self, value1: &FieldValue, value2: &FieldValue) -> f64 {
        match self {
            FieldHandler::HumanName(h) => h.compare(&value1.to_string(), &value2.to_string()),
            FieldHandler::Date(h) => {
                match (self.coerce_date(h, value1), self.coerce_date(h, value2)) {
                    (Some(d1), Some(d2)) => h.compare(&d1, &d2),
                    _ => 0.0,
                }
            }
            FieldHandler::ProperNoun(h) => h.compare(&value1.to_string(), &value2.to_string()),
        }
    }

    /// Run preprocess, pattern search and format in one pass.
    ///
    /// The returned position refers to the preprocessed text.
    pub fn extract(&self, text: &str) -> Option<ExtractionMatch<FieldValue>> {
        let cleaned = self.preprocess(text);
        self.extract_raw(&cleaned)
    }

    /// Pattern search and format without preprocessing.
    pub fn extract_raw(&self, text: &str) -> Option<ExtractionMatch<FieldValue>> {
        let found = self.find_match(text)?;
        let value = self.format(&found.value)?;
        Some(found.map(|_| value))
    }

    /// Render a value as text that this handler formats back to the same
    /// value.
    ///
    /// The date handler renders ISO `YYYY-MM-DD`, normalizing a textual
    /// value through `format` first; text that is not a date is returned
    /// as is. Text handlers return the text.
    pub fn render(&self, value: &FieldValue) -> String {
        match self {
            FieldHandler::Date(h) => match self.coerce_date(h, value) {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => value.to_string(),
            },
            FieldHandler::HumanName(_) | FieldHandler::ProperNoun(_) => value.to_string(),
        }
    }

    fn coerce_date(&self, handler: &DateHandler, value: &FieldValue) -> Option<chrono::NaiveDate> {
        match value {
            FieldValue::Date(date) => Some(*date),
            FieldValue::Text(text) => handler.format(text),
        }
    }
}

impl From<HumanNameHandler> for FieldHandler {
    fn from(handler: HumanNameHandler) -> Self {
        FieldHandler::HumanName(handler)
    }
}

impl From<DateHandler> for FieldHandler {
    fn from(handler: DateHandler) -> Self {
        FieldHandler::Date(handler)
    }
}

impl From<ProperNounHandler> for FieldHandler {
    fn from(handler: ProperNounHandler) -> Self {
        FieldHandler::ProperNoun(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::models::config::DateConfig;

    fn date_handler() -> FieldHandler {
        DateHandler::with_config(DateConfig {
            allow_future_years: false,
            reference_year: Some(2024),
        })
        .into()
    }

    #[test]
    fn test_find_match_reports_trimmed_position() {
        let handler: FieldHandler = ProperNounHandler::new().into();
        let found = handler.find_match("  new york ").unwrap();
        assert_eq!(found.value, "new york");
        assert_eq!(found.position, Some((2, 10)));
        assert_eq!(found.pattern, 0);
    }

    #[test]
    fn test_find_match_skips_blank_matches() {
        let handler: FieldHandler = HumanNameHandler::new().into();
        assert_eq!(handler.find_value("   123 SMITH"), Some("SMITH".to_string()));
        assert_eq!(handler.find_value("1952"), Some("1".to_string()));
        assert_eq!(handler.find_value("2345 ###"), None);
    }

    #[test]
    fn test_extract_date_pipeline() {
        let handler = date_handler();
        let found = handler.extract("DOB: O 1 / I 5 / 2 O 2 3").unwrap();
        assert_eq!(found.value, FieldValue::Date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()));
        assert_eq!(found.source, "O1/I5/2O23");
        assert_eq!(found.pattern, 0);
    }

    #[test]
    fn test_extract_none_when_nothing_parses() {
        let handler = date_handler();
        assert_eq!(handler.extract("no date here"), None);
        assert_eq!(handler.extract(""), None);
    }

    #[test]
    fn test_extract_name_pipeline() {
        let handler: FieldHandler = HumanNameHandler::new().into();
        let found = handler.extract("SMITH, JOHN").unwrap();
        assert_eq!(found.value, FieldValue::Text("John Smith".to_string()));
    }

    #[test]
    fn test_render_is_reformattable() {
        let handler = date_handler();
        let value = handler.format("O1/I5/2O23").unwrap();
        assert_eq!(handler.render(&value), "2023-01-15");
        assert_eq!(handler.format(&handler.render(&value)), Some(value));
    }

    #[test]
    fn test_render_normalizes_text_for_dates() {
        let handler = date_handler();
        let raw = FieldValue::Text("O1/I5/2O23".to_string());
        assert_eq!(handler.render(&raw), "2023-01-15");

        let junk = FieldValue::Text("not a date".to_string());
        assert_eq!(handler.render(&junk), "not a date");

        let names: FieldHandler = HumanNameHandler::new().into();
        assert_eq!(names.render(&raw), "O1/I5/2O23");
    }

    #[test]
    fn test_date_score_accepts_text_query() {
        let handler = date_handler();
        let query = FieldValue::Text("2023-01-15".to_string());
        assert_eq!(handler.match_score(&query, "DOB 01/15/2023"), 1.0);

        let garbage = FieldValue::Text("not a date".to_string());
        assert_eq!(handler.match_score(&garbage, "DOB 01/15/2023"), 0.0);
    }

    #[test]
    fn test_compare_symmetric_for_all_variants() {
        let pairs = [
            (FieldHandler::from(HumanNameHandler::new()), "John Smith", "Jon Smyth Jr"),
            (date_handler(), "2023-01-15", "2023-01-16"),
            (FieldHandler::from(ProperNounHandler::new()), "United States", "United Kingdom"),
        ];

        for (handler, a, b) in pairs {
            let a = handler.format(a).unwrap();
            let b = handler.format(b).unwrap();
            let ab = handler.compare(&a, &b);
            let ba = handler.compare(&b, &a);
            assert!((ab - ba).abs() < 1e-9, "{}: {} != {}", handler.kind(), ab, ba);
            assert!((handler.compare(&a, &a) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_format_idempotent_for_all_variants() {
        let cases = [
            (FieldHandler::from(HumanNameHandler::new()), "SMITH, JOHN"),
            (date_handler(), "O1/I5/2O23"),
            (FieldHandler::from(ProperNounHandler::new()), "uniteD staTES"),
        ];

        for (handler, raw) in cases {
            let once = handler.format(raw).unwrap();
            let twice = handler.format(&handler.render(&once)).unwrap();
            assert_eq!(once, twice);
        }
    }
}
