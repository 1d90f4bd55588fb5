//! Validation result and violation value objects

use crate::constants::VALIDATION_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Severity of a rule violation
///
/// `Critical` is reserved for failed verplicht-priority rules; a single
/// critical violation blocks acceptance regardless of the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, never blocks
    Info,
    /// Low-impact violation
    Warning,
    /// Significant violation
    Error,
    /// Failed verplicht rule; blocks acceptance on its own
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Value Object: One Failed Rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Stable identifier of the failed rule (e.g., "STR001")
    pub rule_id: String,
    /// Severity derived from the rule's priority
    pub severity: Severity,
    /// Human-readable description of the violation
    pub message: String,
    /// Suggested fix, when the rule defines one
    pub suggestion: Option<String>,
}

/// Value Object: Outcome of Evaluating One Candidate Text
///
/// Created fresh per evaluation call, immutable, owned by the caller and
/// never cached across calls. Deterministic: the same (text, term,
/// categorie, context, rule-set snapshot) always yields the same result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Weighted aggregate score in [0, 1]
    pub overall_score: f64,
    /// Score meets the hard minimum and no critical violation occurred
    pub is_acceptable: bool,
    /// Score sits between the soft and hard minimums; display hint only
    pub borderline: bool,
    /// Every failed rule, sorted by priority then weight
    pub violations: Vec<RuleViolation>,
    /// Schema tag for persisted snapshots
    pub schema_version: String,
}

impl ValidationResult {
    /// Build a result with the current schema tag
    pub fn new(
        overall_score: f64,
        is_acceptable: bool,
        borderline: bool,
        violations: Vec<RuleViolation>,
    ) -> Self {
        Self {
            overall_score,
            is_acceptable,
            borderline,
            violations,
            schema_version: VALIDATION_SCHEMA_VERSION.to_string(),
        }
    }

    /// Violations with critical severity
    pub fn critical_violations(&self) -> impl Iterator<Item = &RuleViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Critical)
    }

    /// True when at least one verplicht rule failed
    pub fn has_critical(&self) -> bool {
        self.critical_violations().next().is_some()
    }
}
