//! Approximate substring matching.
//!
//! A pattern matches a field when some substring of the field is within a
//! bounded Levenshtein distance of the pattern (Sellers' algorithm). The
//! mismatch ratio is `distance / pattern length`, so exact substrings and
//! prefixes score 0 and a ratio of 0.3 tolerates roughly one typo in three
//! characters.

use crate::text::fold_key;

/// A folded search pattern, ready to be matched against many fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    /// Fold `text` into a pattern. Returns `None` when nothing is left to match.
    pub fn new(text: &str) -> Option<Self> {
        let chars: Vec<char> = fold_key(text).chars().collect();
        if chars.is_empty() {
            None
        } else {
            Some(Self { chars })
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Mismatch ratio against `field`, or `None` if it exceeds `threshold`.
    ///
    /// `field` is folded the same way the pattern was.
    pub fn mismatch(&self, field: &str, threshold: f64) -> Option<f64> {
        let folded: Vec<char> = fold_key(field).chars().collect();
        if folded.is_empty() {
            return None;
        }
        let ratio = substring_distance(&self.chars, &folded) as f64 / self.len() as f64;
        (ratio <= threshold).then_some(ratio)
    }
}

/// Smallest edit distance between `pattern` and any substring of `text`.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // column[i] = distance of pattern[..i] to the best substring ending at the current text position
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diagonal = column[0];
        column[0] = 0;
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != tc);
            let value = (diagonal + cost)
                .min(column[i] + 1)
                .min(column[i - 1] + 1);
            diagonal = column[i];
            column[i] = value;
        }
        best = best.min(column[m]);
    }

    best
}

/// Length normalisation for a field: shorter fields rank higher for the same
/// match quality.
pub fn field_norm(field: &str) -> f64 {
    let words = field.split_whitespace().count().max(1);
    1.0 / (words as f64).sqrt()
}
