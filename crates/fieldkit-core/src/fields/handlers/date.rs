//! Date extraction from OCR-corrupted text.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::fields::similarity::{PartialRatio, Similarity};
use crate::fields::FieldType;
use crate::models::config::DateConfig;
use crate::models::value::{FieldKind, StorageType};

use super::confusables::{correct_digits, join_corrected};
use super::patterns::{
    DATE_ISO, DATE_MONTH_NAME, DATE_NUMERIC_LONG_YEAR, DATE_NUMERIC_SHORT_YEAR, FLEX_ISO,
    FLEX_MONTH_NAME, FLEX_NUMERIC, MONTH_NAME_HINT, WHITESPACE,
};

/// Renderings of a date tried when scoring against free text.
const SCORE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%m/%d/%y", "%b %d, %Y"];

/// Glyph correction applied to a matched date before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Correction {
    /// Numeric day/month/year groups: normalize separators, then digits.
    Separated,
    /// Fixed separators: correct digits only.
    Digits,
    /// Month names are not digit-confusable.
    Verbatim,
}

impl Correction {
    fn apply(self, caps: &Captures<'_>) -> String {
        match self {
            Correction::Separated => join_corrected(&[&caps[1], &caps[2], &caps[3]]),
            Correction::Digits => correct_digits(&caps[0]),
            Correction::Verbatim => caps[0].to_string(),
        }
    }
}

struct DateShape {
    pattern: &'static Regex,
    correction: Correction,
}

lazy_static! {
    static ref DATE_SHAPES: Vec<DateShape> = vec![
        DateShape { pattern: &*DATE_NUMERIC_LONG_YEAR, correction: Correction::Separated },
        DateShape { pattern: &*DATE_ISO, correction: Correction::Digits },
        DateShape { pattern: &*DATE_NUMERIC_SHORT_YEAR, correction: Correction::Separated },
        DateShape { pattern: &*DATE_MONTH_NAME, correction: Correction::Verbatim },
    ];
}

/// Date field handler.
#[derive(Debug, Clone)]
pub struct DateHandler {
    patterns: Vec<&'static Regex>,
    similarity: Arc<dyn Similarity>,
    config: DateConfig,
}

impl DateHandler {
    /// Create a handler with default settings.
    pub fn new() -> Self {
        Self::with_config(DateConfig::default())
    }

    /// Create a handler from configuration.
    pub fn with_config(config: DateConfig) -> Self {
        Self {
            patterns: DATE_SHAPES.iter().map(|shape| shape.pattern).collect(),
            similarity: Arc::new(PartialRatio),
            config,
        }
    }

    /// Use a different similarity measure for scoring.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Move a future date back one century.
    ///
    /// Returns `None` if the shifted date does not exist (Feb 29).
    fn disambiguate_century(&self, date: NaiveDate) -> Option<NaiveDate> {
        let current_year = self.config.current_year();
        if self.config.allow_future_years || date.year() <= current_year {
            return Some(date);
        }

        let shifted = date.with_year(date.year() - 100);
        debug!(
            "Date {} is after {}, shifted to {:?}",
            date, current_year, shifted
        );
        shifted
    }
}

impl Default for DateHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldType for DateHandler {
    type Value = NaiveDate;

    fn kind(&self) -> FieldKind {
        FieldKind::Date
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Date
    }

    fn patterns(&self) -> &[&'static Regex] {
        &self.patterns
    }

    /// Remove scanning noise.
    ///
    /// Whitespace is stripped only when no month name seems present, since
    /// numeric dates are often split by stray spaces but "Jan 5 1990" needs
    /// its spaces to keep day and year apart.
    fn preprocess(&self, text: &str) -> String {
        let text = if MONTH_NAME_HINT.is_match(text) {
            text.to_string()
        } else {
            WHITESPACE.replace_all(text, "").into_owned()
        };

        text.chars()
            .filter(|c| !matches!(c, ',' | '.' | '\'' | '`'))
            .collect()
    }

    /// Parse the first date shape that yields a valid calendar date.
    ///
    /// A shape that matches but does not parse falls through to the next.
    fn format(&self, value: &str) -> Option<NaiveDate> {
        for (index, shape) in DATE_SHAPES.iter().enumerate() {
            let Some(caps) = shape.pattern.captures(value) else {
                trace!("Date pattern {} did not match", index);
                continue;
            };

            let corrected = shape.correction.apply(&caps);
            debug!(
                "Date pattern {} matched {:?}, corrected to {:?}",
                index,
                &caps[0],
                corrected
            );

            match parse_flexible(&corrected).and_then(|d| self.disambiguate_century(d)) {
                Some(date) => return Some(date),
                None => debug!("Could not parse {:?} as a date", corrected),
            }
        }

        None
    }

    /// Best similarity of the query rendered in common layouts.
    fn match_score(&self, query: &NaiveDate, text: &str) -> f64 {
        let best = SCORE_FORMATS
            .iter()
            .map(|fmt| self.similarity.ratio(&query.format(fmt).to_string(), text))
            .max()
            .unwrap_or(0);

        f64::from(best) / 100.0
    }
}

/// Parse a cleaned date string without a fixed format.
///
/// Accepts `M/D/YYYY`, `M/D/YY` (also with `-` or `.`), `YYYY-MM-DD` and
/// `Mon D YYYY` with an optional comma. Numeric dates are read month first
/// unless the first field cannot be a month and the second can.
pub fn parse_flexible(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = FLEX_ISO.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = FLEX_NUMERIC.captures(text) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;

        let (month, day) = if first > 12 && second <= 12 {
            (second, first)
        } else {
            (first, second)
        };
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = FLEX_MONTH_NAME.captures(text) {
        let month = month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Two-digit years land in 2000-2099; century disambiguation fixes the rest.
fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let number = match month.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}
