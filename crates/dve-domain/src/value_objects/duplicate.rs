//! Duplicate detection value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a duplicate candidate was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Identical (begrip, full context, categorie) tuple
    Exact,
    /// Begrip similarity above the fuzzy threshold
    Fuzzy,
    /// Cross-term hit via the synonym table
    Synonym,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Synonym => "synonym",
        };
        write!(f, "{name}")
    }
}

/// Value Object: One Duplicate Candidate
///
/// Produced transiently per detection call and never persisted. Results are
/// ordered by descending similarity, ties broken by most recently updated
/// record first, so repeated calls without intervening writes return
/// identical orderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Identifier of the existing definition record
    pub definition_id: String,
    /// Begrip of the matched record, for display
    pub begrip: String,
    /// Similarity in [0, 1]; 1.0 for exact matches
    pub similarity: f64,
    /// Match classification
    pub kind: MatchKind,
    /// Last update of the matched record, used as ordering tie-break
    pub updated_at: DateTime<Utc>,
}

impl DuplicateMatch {
    /// Whether this match sits in the near-duplicate tier for the given
    /// threshold. The UI should strongly discourage proceeding without
    /// explicit confirmation for these.
    pub fn is_near_duplicate(&self, near_duplicate_threshold: f64) -> bool {
        self.similarity >= near_duplicate_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_duplicate_tier() {
        let m = DuplicateMatch {
            definition_id: "d1".to_string(),
            begrip: "hechtenis".to_string(),
            similarity: 0.92,
            kind: MatchKind::Fuzzy,
            updated_at: Utc::now(),
        };
        assert!(m.is_near_duplicate(0.9));
        assert!(!m.is_near_duplicate(0.95));
    }
}
