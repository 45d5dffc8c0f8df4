//! Answer matching for typed quiz answers.
//!
//! An answer is correct when, after trimming and lowercasing, it equals the
//! expected answer or either one contains the other. Containment is loose for
//! very short answers ("a" is inside almost anything, and a blank answer is
//! inside everything); scores recorded in
//! existing progress files were computed with the same rule.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// Trimmed, lowercased typed answer.
    pub typed_normalized: String,
    /// Trimmed, lowercased expected answer.
    pub correct_normalized: String,
}

/// Compare a typed answer to the expected answer.
pub fn compare_answers(typed: &str, correct: &str) -> MatchResult {
    let typed_normalized = normalize(typed);
    let correct_normalized = normalize(correct);
    let is_correct = matches_normalized(&typed_normalized, &correct_normalized);

    MatchResult {
        is_correct,
        typed_normalized,
        correct_normalized,
    }
}

/// Symmetric containment check: `is_correct(a, b) == is_correct(b, a)`.
pub fn is_correct(typed: &str, correct: &str) -> bool {
    matches_normalized(&normalize(typed), &normalize(correct))
}

/// `correct / total * 100` rounded to two decimals; zero when `total` is zero.
pub fn score_percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(correct as f64 / total as f64 * 100.0)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn matches_normalized(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}
