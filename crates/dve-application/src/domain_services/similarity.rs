//! Begrip Similarity
//!
//! Jaro-Winkler character similarity blended with word-level overlap.
//! Character similarity catches spelling variants ("hechtenis" vs
//! "hechtennis"); word overlap catches reordered or partially shared
//! compound terms ("voorlopige hechtenis" vs "hechtenis, voorlopige").

use rapidfuzz::distance::jaro_winkler;
use std::collections::BTreeSet;
use unicode_segmentation::UnicodeSegmentation;

/// Weight of the character-level component in the blend
const CHAR_WEIGHT: f64 = 0.7;
/// Weight of the word-overlap component in the blend
const TOKEN_WEIGHT: f64 = 0.3;

/// Similarity between two begrip strings, in [0, 1].
///
/// Comparison is case- and whitespace-insensitive. Identical normalized
/// strings score exactly 1.0.
pub fn begrip_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let char_sim = jaro_winkler::similarity(a.chars(), b.chars());
    let token_sim = token_overlap(&a, &b);
    (CHAR_WEIGHT * char_sim + TOKEN_WEIGHT * token_sim).clamp(0.0, 1.0)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Jaccard overlap of the word sets
fn token_overlap(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.unicode_words().collect();
    let tokens_b: BTreeSet<&str> = b.unicode_words().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}
