//! Generic proper noun normalization.

use regex::Regex;

use crate::fields::FieldType;
use crate::models::value::{FieldKind, StorageType};

use super::patterns::ANY_TEXT;
use super::text::title_case;

/// Proper noun field handler.
#[derive(Debug, Clone)]
pub struct ProperNounHandler {
    patterns: Vec<&'static Regex>,
}

impl ProperNounHandler {
    pub fn new() -> Self {
        Self {
            patterns: vec![&*ANY_TEXT],
        }
    }
}

impl Default for ProperNounHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldType for ProperNounHandler {
    type Value = String;

    fn kind(&self) -> FieldKind {
        FieldKind::ProperNoun
    }

    fn storage_type(&self) -> StorageType {
        StorageType::String { max_len: 1023 }
    }

    fn patterns(&self) -> &[&'static Regex] {
        &self.patterns
    }

    fn format(&self, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return None;
        }
        Some(title_case(value))
    }
}
