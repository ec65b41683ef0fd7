//! Field type tags, canonical values and storage type tags.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Semantic kind of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Personal name ("Last, First" or "First Last").
    HumanName,
    /// Calendar date without a time component.
    Date,
    /// Generic proper noun (place, organization).
    ProperNoun,
}

impl FieldKind {
    /// Every known kind, in registry order.
    pub const ALL: [FieldKind; 3] = [FieldKind::HumanName, FieldKind::Date, FieldKind::ProperNoun];

    /// The type tag used to select a handler.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::HumanName => "human_name",
            FieldKind::Date => "date",
            FieldKind::ProperNoun => "proper_noun",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human_name" => Ok(FieldKind::HumanName),
            "date" => Ok(FieldKind::Date),
            "proper_noun" => Ok(FieldKind::ProperNoun),
            other => Err(FieldError::UnknownType(other.to_string())),
        }
    }
}

/// Storage column type declared by a handler.
///
/// Opaque to this crate: only a schema binding layer acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageType {
    /// Variable-length string with a maximum length.
    String { max_len: usize },
    /// Calendar date.
    Date,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::String { max_len } => write!(f, "string({})", max_len),
            StorageType::Date => f.write_str("date"),
        }
    }
}

/// Canonical value produced by formatting a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A calendar date.
    Date(NaiveDate),
    /// A normalized string (names, proper nouns).
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        FieldValue::Date(date)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}
