//! Human name normalization and fuzzy matching.

use std::sync::Arc;

use regex::Regex;

use crate::fields::similarity::{PartialRatio, Similarity};
use crate::fields::FieldType;
use crate::models::config::NameConfig;
use crate::models::value::{FieldKind, StorageType};

use super::patterns::{NAME_LAST_FIRST, NAME_PATTERN};
use super::text::{collapse_whitespace, is_all_upper, title_case};

/// Human name field handler.
#[derive(Debug, Clone)]
pub struct HumanNameHandler {
    patterns: Vec<&'static Regex>,
    similarity: Arc<dyn Similarity>,
    min_token_len: usize,
}

impl HumanNameHandler {
    /// Create a handler with default settings.
    pub fn new() -> Self {
        Self::with_config(&NameConfig::default())
    }

    /// Create a handler from configuration.
    pub fn with_config(config: &NameConfig) -> Self {
        Self {
            patterns: vec![&*NAME_PATTERN],
            similarity: Arc::new(PartialRatio),
            min_token_len: config.min_token_len,
        }
    }

    /// Use a different similarity measure for scoring.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }
}

impl Default for HumanNameHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldType for HumanNameHandler {
    type Value = String;

    fn kind(&self) -> FieldKind {
        FieldKind::HumanName
    }

    fn storage_type(&self) -> StorageType {
        StorageType::String { max_len: 255 }
    }

    fn patterns(&self) -> &[&'static Regex] {
        &self.patterns
    }

    /// Reorder "Last, First" to "First Last" and title-case all-caps names.
    ///
    /// Text without a comma is taken to be in "First Last" order already.
    /// Mixed-case names keep their casing ("McDonald").
    fn format(&self, value: &str) -> Option<String> {
        let value = collapse_whitespace(value);

        let name = match NAME_LAST_FIRST.captures(&value) {
            Some(caps) => format!("{} {}", caps[2].trim(), caps[1].trim()),
            None => value.clone(),
        };

        if name.trim().is_empty() {
            return None;
        }

        if is_all_upper(&name) {
            Some(title_case(&name))
        } else {
            Some(name)
        }
    }

    /// Length-weighted average similarity of each query token against `text`.
    ///
    /// Commas and periods are dropped from the query and tokens shorter than
    /// the configured minimum are ignored. Returns 0 when no token remains.
    fn match_score(&self, query: &String, text: &str) -> f64 {
        let cleaned: String = query.chars().filter(|c| !matches!(c, ',' | '.')).collect();

        let (weighted, total_len) = cleaned
            .split_whitespace()
            .map(|word| (word, word.chars().count()))
            .filter(|(_, len)| *len >= self.min_token_len)
            .fold((0.0f64, 0usize), |(weighted, total_len), (word, len)| {
                let ratio = f64::from(self.similarity.ratio(word, text));
                (weighted + ratio * len as f64, total_len + len)
            });

        if total_len == 0 {
            return 0.0;
        }

        weighted / (100.0 * total_len as f64)
    }

    /// Average of both scoring directions, since scoring only tokenizes
    /// the query side.
    fn compare(&self, value1: &String, value2: &String) -> f64 {
        (self.match_score(value1, value2) + self.match_score(value2, value1)) / 2.0
    }
}
