//! Text similarity used by the skill matcher.
//!
//! The score combines three signals:
//!
//! - word-set Jaccard over words longer than two characters
//! - a flat bonus when the longer text contains the shorter one
//! - the overlap of taxonomy keyword stems found in either text
//!
//! The sum is capped at 1.0.

use std::collections::BTreeSet;

/// Bonus when one normalized text contains the other.
pub const SUBSTRING_BONUS: f32 = 0.3;
/// Weight of the keyword-stem overlap ratio.
pub const KEYWORD_WEIGHT: f32 = 0.4;
/// Words this short are ignored by the Jaccard term.
const MIN_WORD_CHARS: usize = 3;

/// Lower-case, trim, drop punctuation and collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A normalized text with its word set and keyword stems precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedText {
    normalized: String,
    words: BTreeSet<String>,
    /// Indices into the stem list, ascending.
    stems: Vec<usize>,
}

impl PreparedText {
    pub fn new<S: AsRef<str>>(text: &str, stems: &[S]) -> Self {
        let normalized = normalize_text(text);
        let words = normalized
            .split(' ')
            .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
            .map(str::to_string)
            .collect();
        let stems = stems
            .iter()
            .enumerate()
            .filter(|(_, stem)| {
                let stem = stem.as_ref();
                !stem.is_empty() && normalized.contains(stem)
            })
            .map(|(idx, _)| idx)
            .collect();
        Self {
            normalized,
            words,
            stems,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Similarity of `self` (the worker's phrase) to `target`, in [0, 1].
    ///
    /// Not symmetric: the keyword term only counts when `self` carries at
    /// least one stem.
    pub fn similarity(&self, target: &PreparedText) -> f32 {
        if self.is_empty() || target.is_empty() {
            return 0.0;
        }

        let union = self.words.union(&target.words).count();
        let jaccard = if union == 0 {
            0.0
        } else {
            self.words.intersection(&target.words).count() as f32 / union as f32
        };

        let (longer, shorter) = if self.normalized.len() > target.normalized.len() {
            (&self.normalized, &target.normalized)
        } else {
            (&target.normalized, &self.normalized)
        };
        let substring = if longer.contains(shorter.as_str()) {
            SUBSTRING_BONUS
        } else {
            0.0
        };

        let keyword = if self.stems.is_empty() {
            0.0
        } else {
            let shared = self
                .stems
                .iter()
                .filter(|idx| target.stems.binary_search(*idx).is_ok())
                .count();
            let denominator = self.stems.len().max(target.stems.len());
            shared as f32 / denominator as f32 * KEYWORD_WEIGHT
        };

        (jaccard + substring + keyword).min(1.0)
    }
}

/// One-off similarity of two raw texts.
pub fn similarity<S: AsRef<str>>(phrase: &str, target: &str, stems: &[S]) -> f32 {
    PreparedText::new(phrase, stems).similarity(&PreparedText::new(target, stems))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEMS: &[&str] = &["water", "seed", "weed", "milk", "cow"];

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn normalizes_punctuation_and_spacing() {
        assert_eq!(normalize_text("  Milking, the COWS!!  daily "), "milking the cows daily");
        assert_eq!(normalize_text("post-harvest"), "postharvest");
        assert_eq!(normalize_text("?!"), "");
    }

    #[test]
    fn identical_phrases_score_one() {
        assert!(close(similarity("Watering seedlings", "watering seedlings", STEMS), 1.0));
    }

    #[test]
    fn combines_jaccard_substring_and_keywords() {
        // Jaccard 1/4, "weeding" is contained, both carry only "weed".
        let score = similarity("Weeding the maize plot", "weeding", STEMS);
        assert!(close(score, 0.25 + 0.3 + 0.4));
    }

    #[test]
    fn keyword_ratio_uses_larger_stem_count() {
        // No shared words, no containment; stems {milk} vs {milk, cow}.
        let score = similarity("milking", "dairy cow milk", STEMS);
        assert!(close(score, 0.5 * 0.4));
    }

    #[test]
    fn phrase_without_stems_gets_no_keyword_bonus() {
        let score = similarity("goats", "cow milking", STEMS);
        assert!(close(score, 0.0));
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(similarity("!!!!", "weeding", STEMS), 0.0);
    }
}
