//! String similarity used for match scoring.
//!
//! Handlers only depend on the [`Similarity`] trait; [`PartialRatio`] is the
//! default implementation.

use std::fmt;

use strsim::normalized_levenshtein;

/// A fuzzy string similarity measure.
pub trait Similarity: fmt::Debug + Send + Sync {
    /// Similarity of `a` and `b` as an integer in `0..=100`.
    fn ratio(&self, a: &str, b: &str) -> u8;
}

/// Substring-tolerant Levenshtein similarity.
///
/// Slides the shorter string across the longer one and keeps the best
/// normalized Levenshtein similarity of any equal-length window, so a short
/// name scores 100 against a longer line that contains it verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl PartialRatio {
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for PartialRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let a_len = a.chars().count();
        let b_len = b.chars().count();
        let (shorter, longer, shorter_len, longer_len) = if a_len <= b_len {
            (a, b, a_len, b_len)
        } else {
            (b, a, b_len, a_len)
        };

        let longer_chars: Vec<char> = longer.chars().collect();
        let mut best = 0.0f64;

        for start in 0..=(longer_len - shorter_len) {
            let window: String = longer_chars[start..start + shorter_len].iter().collect();
            best = best.max(normalized_levenshtein(shorter, &window));
            if best >= 1.0 {
                break;
            }
        }

        (best * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_is_perfect() {
        assert_eq!(PartialRatio.ratio("Smith", "Mr. John Smith, Esq."), 100);
        assert_eq!(PartialRatio.ratio("Mr. John Smith, Esq.", "Smith"), 100);
    }

    #[test]
    fn test_identical() {
        assert_eq!(PartialRatio.ratio("01/15/2023", "01/15/2023"), 100);
    }

    #[test]
    fn test_one_edit() {
        // "Smyth" vs best window "Smith": one substitution out of five.
        assert_eq!(PartialRatio.ratio("Smyth", "John Smith"), 80);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(PartialRatio.ratio("", "text"), 0);
        assert_eq!(PartialRatio.ratio("text", ""), 0);
        assert_eq!(PartialRatio.ratio("", ""), 0);
    }

    #[test]
    fn test_case_sensitive() {
        assert!(PartialRatio.ratio("SMITH", "Smith") < 100);
    }

    #[test]
    fn test_unrelated() {
        assert!(PartialRatio.ratio("Zoe", "abcdefgh") < 50);
    }
}
