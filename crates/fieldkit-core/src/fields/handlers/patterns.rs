//! Precompiled regex patterns for field extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::confusables::{digit_class, separator_class};

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

lazy_static! {
    // Human names: letters (0/1 stand in for O/l), hyphens, spaces, commas,
    // apostrophes, periods
    pub static ref NAME_PATTERN: Regex = Regex::new(
        r"[A-Za-z01\-\s,'.]+"
    ).unwrap();

    // "Last, First ..." shape
    pub static ref NAME_LAST_FIRST: Regex = Regex::new(
        r"([A-Za-z01\-\s']+),\s*([A-Za-z01\-\s']+.)"
    ).unwrap();

    // Date shapes, in priority order. Digit positions accept OCR-confusable
    // glyphs; numeric separators accept glyphs confusable with '/'.
    pub static ref DATE_NUMERIC_LONG_YEAR: Regex = Regex::new(&format!(
        r"({d}{{1,2}}){s}({d}{{1,2}}){s}({d}{{4}})",
        d = digit_class(),
        s = separator_class(),
    )).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(&format!(
        r"{d}{{4}}-{d}{{2}}-{d}{{2}}",
        d = digit_class(),
    )).unwrap();

    pub static ref DATE_NUMERIC_SHORT_YEAR: Regex = Regex::new(&format!(
        r"({d}{{1,2}}){s}({d}{{1,2}}){s}({d}{{2}})\b",
        d = digit_class(),
        s = separator_class(),
    )).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(&format!(
        r"({m})\s*([0-9]{{1,2}})\s*([0-9]{{4}})",
        m = MONTHS,
    )).unwrap();

    // Corrected date strings accepted by the flexible parser
    pub static ref FLEX_NUMERIC: Regex = Regex::new(
        r"^\s*([0-9]{1,2})[/.\-]([0-9]{1,2})[/.\-]([0-9]{4}|[0-9]{2})\s*$"
    ).unwrap();

    pub static ref FLEX_ISO: Regex = Regex::new(
        r"^\s*([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})\s*$"
    ).unwrap();

    pub static ref FLEX_MONTH_NAME: Regex = Regex::new(
        r"(?i)^\s*(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*([0-9]{1,2})(?:st|nd|rd|th)?\s*,?\s*([0-9]{4})\s*$"
    ).unwrap();

    // Capitalized three-letter run, taken as a sign that a month name is present
    pub static ref MONTH_NAME_HINT: Regex = Regex::new(r"[A-Z][a-z]{2}").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Proper nouns: the whole text
    pub static ref ANY_TEXT: Regex = Regex::new(r"(?s).+").unwrap();
}
