//! Declarative Rule Model
//!
//! A toetsregel is defined as a data structure: identity, weight, priority,
//! category, applicability and a detection variant. Rules are immutable once
//! loaded; the registry replaces whole snapshots on reload.

/// Builtin standard rule tables
pub mod builtin;
/// YAML rule loading
pub mod loader;
/// Registry snapshot and hot reload
pub mod registry;

use crate::evaluators::{DelegateCheck, RuleOutcome};
use dve_domain::{Categorie, ContextSet, Severity};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Priority of a toetsregel
///
/// Ordering is semantic: `Verplicht` ranks highest. A failed verplicht rule
/// blocks acceptance regardless of the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulePriority {
    /// Advisory
    Laag,
    /// Standard
    Midden,
    /// Important
    Hoog,
    /// Mandatory; failure is always critical
    Verplicht,
}

impl RulePriority {
    /// Violation severity for a failed rule of this priority
    pub fn severity(self) -> Severity {
        match self {
            Self::Verplicht => Severity::Critical,
            Self::Hoog => Severity::Error,
            Self::Midden => Severity::Warning,
            Self::Laag => Severity::Info,
        }
    }
}

impl std::fmt::Display for RulePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Verplicht => "verplicht",
            Self::Hoog => "hoog",
            Self::Midden => "midden",
            Self::Laag => "laag",
        };
        write!(f, "{name}")
    }
}

/// Category of a toetsregel, for grouping and applicability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Wording and word choice
    Content,
    /// The essential meaning is stated first and completely
    Essentie,
    /// Sentence and text structure
    Structuur,
    /// No references that undermine the definition's self-containedness
    Integriteit,
    /// Consistency with the declared context
    Coherentie,
    /// Version hygiene of the text itself
    Versie,
    /// Artifacts of machine generation
    #[serde(rename = "ai-kwaliteit")]
    AiKwaliteit,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Content => "content",
            Self::Essentie => "essentie",
            Self::Structuur => "structuur",
            Self::Integriteit => "integriteit",
            Self::Coherentie => "coherentie",
            Self::Versie => "versie",
            Self::AiKwaliteit => "ai-kwaliteit",
        };
        write!(f, "{name}")
    }
}

/// Which (categorie, context) combinations a rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    /// Applies to every candidate
    All,
    /// Applies when the tag set intersects the candidate's categorie tag or
    /// the kind tags of its non-empty context lists
    Tags(BTreeSet<String>),
}

impl Applicability {
    /// Evaluate applicability for a candidate
    pub fn applies_to(&self, categorie: Categorie, context: &ContextSet) -> bool {
        match self {
            Self::All => true,
            Self::Tags(tags) => {
                tags.contains(categorie.as_tag())
                    || context.kind_tags().iter().any(|t| tags.contains(*t))
            }
        }
    }
}

/// Polarity of a pattern-based detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternPolarity {
    /// The rule passes when at least one pattern matches
    Require,
    /// The rule passes when no pattern matches
    Forbid,
}

/// Detection variant of a rule: regex patterns or a typed delegate
#[derive(Debug, Clone)]
pub enum Detection {
    /// Regex pattern search against the candidate text
    Patterns {
        /// Compiled patterns, case-insensitive
        patterns: Vec<Regex>,
        /// Whether a match means pass or fail
        polarity: PatternPolarity,
    },
    /// Richer evaluator with graded scoring
    Delegate(DelegateCheck),
}

/// Declarative toetsregel
///
/// Immutable once loaded; identified by `id`. The examples are
/// documentation only and never influence evaluation.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable rule identifier (e.g., "STR001")
    pub id: String,
    /// Human-readable rule name
    pub naam: String,
    /// What the rule checks
    pub omschrijving: String,
    /// Violation message shown on failure
    pub melding: String,
    /// Suggested fix, if any
    pub suggestie: Option<String>,
    /// Aggregation weight (>= 0)
    pub weight: f64,
    /// Priority tier
    pub priority: RulePriority,
    /// Category for grouping and applicability
    pub category: RuleCategory,
    /// Applicability filter
    pub applicability: Applicability,
    /// Detection variant
    pub detection: Detection,
    /// Passing example texts (documentation only)
    pub voorbeeld_goed: Vec<String>,
    /// Failing example texts (documentation only)
    pub voorbeeld_fout: Vec<String>,
}

impl Rule {
    /// Evaluate the rule against a candidate text.
    ///
    /// Pattern rules yield a binary 0/1 score; delegates may grade in
    /// [0, 1]. The text is evaluated as-is regardless of length: no silent
    /// truncation.
    pub fn evaluate(&self, text: &str, term: &str, context: &ContextSet) -> RuleOutcome {
        match &self.detection {
            Detection::Patterns { patterns, polarity } => {
                let matched = patterns.iter().any(|p| p.is_match(text));
                let passed = match polarity {
                    PatternPolarity::Require => matched,
                    PatternPolarity::Forbid => !matched,
                };
                RuleOutcome {
                    passed,
                    score: if passed { 1.0 } else { 0.0 },
                    message: (!passed).then(|| self.melding.clone()),
                }
            }
            Detection::Delegate(check) => {
                let mut outcome = check.evaluate(text, term, context);
                if !outcome.passed && outcome.message.is_none() {
                    outcome.message = Some(self.melding.clone());
                }
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forbid_rule(pattern: &str) -> Rule {
        Rule {
            id: "T001".to_string(),
            naam: "test".to_string(),
            omschrijving: "test".to_string(),
            melding: "verboden patroon aangetroffen".to_string(),
            suggestie: None,
            weight: 1.0,
            priority: RulePriority::Midden,
            category: RuleCategory::Content,
            applicability: Applicability::All,
            detection: Detection::Patterns {
                patterns: vec![Regex::new(pattern).unwrap()],
                polarity: PatternPolarity::Forbid,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec![],
        }
    }

    #[test]
    fn forbid_polarity() {
        let rule = forbid_rule(r"(?i)\betc\b");
        let ok = rule.evaluate("Een heldere omschrijving.", "begrip", &ContextSet::new());
        assert!(ok.passed);
        assert_eq!(ok.score, 1.0);

        let fail = rule.evaluate("Dingen, etc.", "begrip", &ContextSet::new());
        assert!(!fail.passed);
        assert_eq!(fail.score, 0.0);
        assert_eq!(
            fail.message.as_deref(),
            Some("verboden patroon aangetroffen")
        );
    }

    #[test]
    fn priority_ordering_and_severity() {
        assert!(RulePriority::Verplicht > RulePriority::Hoog);
        assert!(RulePriority::Hoog > RulePriority::Midden);
        assert!(RulePriority::Midden > RulePriority::Laag);
        assert_eq!(
            RulePriority::Verplicht.severity(),
            dve_domain::Severity::Critical
        );
        assert_eq!(RulePriority::Laag.severity(), dve_domain::Severity::Info);
    }

    #[test]
    fn applicability_tags() {
        let app = Applicability::Tags(BTreeSet::from(["wettelijk".to_string()]));
        let with_wet = ContextSet::new().with_wettelijk(["Sv"]);
        let without = ContextSet::new().with_juridisch(["strafrecht"]);

        assert!(app.applies_to(Categorie::Proces, &with_wet));
        assert!(!app.applies_to(Categorie::Proces, &without));

        let cat_app = Applicability::Tags(BTreeSet::from(["proces".to_string()]));
        assert!(cat_app.applies_to(Categorie::Proces, &without));
        assert!(!cat_app.applies_to(Categorie::Entiteit, &without));
    }
}
