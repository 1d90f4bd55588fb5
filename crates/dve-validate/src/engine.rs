//! Validation Engine
//!
//! Evaluates one candidate text against the applicable rule snapshot and
//! aggregates a weighted score. Pure and deterministic: the same (text,
//! term, categorie, context, rule-set snapshot) always yields the same
//! result. No I/O, no randomness.

use crate::rules::registry::RuleRegistry;
use crate::rules::{Rule, RuleCategory, RulePriority};
use dve_domain::constants::{DEFAULT_HARD_MIN_SCORE, DEFAULT_SOFT_MIN_SCORE};
use dve_domain::{Categorie, ContextSet, Error, Result, RuleViolation, Severity, ValidationResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Violation id reported when no rules apply to a candidate
pub const GEEN_REGELS: &str = "GEEN_REGELS";

/// Violation id reported for an empty candidate text
pub const LEGE_TEKST: &str = "LEGE_TEKST";

/// Acceptance thresholds for the validation engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Minimum weighted score for acceptance
    pub hard_min_score: f64,
    /// Borderline threshold; reported, never blocking
    pub soft_min_score: f64,
    /// Whether a failed verplicht rule blocks acceptance
    pub forbid_critical_issues: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            hard_min_score: DEFAULT_HARD_MIN_SCORE,
            soft_min_score: DEFAULT_SOFT_MIN_SCORE,
            forbid_critical_issues: true,
        }
    }
}

/// Weighted multi-rule validation engine
pub struct ValidationEngine {
    registry: Arc<RuleRegistry>,
    settings: ValidationSettings,
}

impl ValidationEngine {
    /// Create an engine over a shared rule registry
    pub fn new(registry: Arc<RuleRegistry>, settings: ValidationSettings) -> Self {
        Self { registry, settings }
    }

    /// The engine's thresholds
    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Evaluate a candidate text.
    ///
    /// # Arguments
    /// * `text` - The candidate definition text
    /// * `term` - The begrip being defined
    /// * `categorie` - Ontological kind, selects applicable rules
    /// * `context` - Context scoping, selects applicable rules
    ///
    /// # Errors
    /// `Error::Validation` when the term is empty; an empty rule match or
    /// empty text is a scored outcome, not an error.
    pub fn evaluate(
        &self,
        text: &str,
        term: &str,
        categorie: Categorie,
        context: &ContextSet,
    ) -> Result<ValidationResult> {
        if term.trim().is_empty() {
            return Err(Error::validation("begrip must not be empty"));
        }

        let rules = self.registry.applicable_rules(categorie, context);
        if rules.is_empty() {
            let violation = RuleViolation {
                rule_id: GEEN_REGELS.to_string(),
                severity: Severity::Error,
                message: "geen toepasselijke toetsregels; tekst kan niet gevalideerd worden"
                    .to_string(),
                suggestion: None,
            };
            return Ok(ValidationResult::new(0.0, false, false, vec![violation]));
        }

        if text.trim().is_empty() {
            return Ok(self.empty_text_result(&rules));
        }

        let mut total_weight = 0.0;
        let mut weighted_sum = 0.0;
        let mut failures: Vec<(&Arc<Rule>, String)> = Vec::new();
        let mut critical_failed = false;

        for rule in &rules {
            let outcome = rule.evaluate(text, term, context);
            total_weight += rule.weight;
            weighted_sum += rule.weight * outcome.score;
            if !outcome.passed {
                if rule.priority == RulePriority::Verplicht {
                    critical_failed = true;
                }
                let message = outcome.message.unwrap_or_else(|| rule.melding.clone());
                failures.push((rule, message));
            }
        }

        // Rules are pre-sorted by priority/weight/id; preserving iteration
        // order keeps the violation list sorted the same way.
        let violations: Vec<RuleViolation> = failures
            .into_iter()
            .map(|(rule, message)| RuleViolation {
                rule_id: rule.id.clone(),
                severity: rule.priority.severity(),
                message,
                suggestion: rule.suggestie.clone(),
            })
            .collect();

        let overall_score = if total_weight > f64::EPSILON {
            (weighted_sum / total_weight).clamp(0.0, 1.0)
        } else if violations.is_empty() {
            1.0
        } else {
            0.0
        };

        let blocked_by_critical = self.settings.forbid_critical_issues && critical_failed;
        let is_acceptable = overall_score >= self.settings.hard_min_score && !blocked_by_critical;
        let borderline = overall_score >= self.settings.soft_min_score
            && overall_score < self.settings.hard_min_score;

        tracing::debug!(
            term,
            score = overall_score,
            acceptable = is_acceptable,
            violations = violations.len(),
            "candidate text evaluated"
        );

        Ok(ValidationResult::new(
            overall_score,
            is_acceptable,
            borderline,
            violations,
        ))
    }

    /// Empty text fails every applicable structural rule immediately.
    fn empty_text_result(&self, rules: &[Arc<Rule>]) -> ValidationResult {
        let mut violations = vec![RuleViolation {
            rule_id: LEGE_TEKST.to_string(),
            severity: Severity::Critical,
            message: "definitietekst is leeg".to_string(),
            suggestion: None,
        }];
        violations.extend(
            rules
                .iter()
                .filter(|r| r.category == RuleCategory::Structuur)
                .map(|rule| RuleViolation {
                    rule_id: rule.id.clone(),
                    severity: rule.priority.severity(),
                    message: rule.melding.clone(),
                    suggestion: rule.suggestie.clone(),
                }),
        );
        ValidationResult::new(0.0, false, false, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::registry::RuleRegistry;
    use crate::rules::{Applicability, Detection, PatternPolarity};
    use regex::RegexBuilder;
    use std::collections::BTreeSet;

    const GOOD_TEXT: &str =
        "Vrijheidsbeneming voorafgaand aan de inhoudelijke behandeling van een strafzaak, \
         opgelegd op grond van het Wetboek van Strafvordering Sv.";

    fn engine() -> ValidationEngine {
        ValidationEngine::new(
            Arc::new(RuleRegistry::builtin().unwrap()),
            ValidationSettings::default(),
        )
    }

    fn proces_context() -> ContextSet {
        ContextSet::new().with_wettelijk(["Sv"])
    }

    #[test]
    fn perfect_text_scores_one() {
        let result = engine()
            .evaluate(GOOD_TEXT, "voorlopige hechtenis", Categorie::Proces, &proces_context())
            .unwrap();
        assert_eq!(result.overall_score, 1.0);
        assert!(result.is_acceptable);
        assert!(!result.borderline);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let texts = [
            GOOD_TEXT,
            "kort",
            "Dit is eigenlijk een soort dingen die vaak enzovoort, etc. Versie 2.",
            "Als AI kan ik geen definitie geven.",
        ];
        for text in texts {
            let result = engine()
                .evaluate(text, "begrip", Categorie::Overig, &proces_context())
                .unwrap();
            assert!(
                (0.0..=1.0).contains(&result.overall_score),
                "score {} out of range for {text:?}",
                result.overall_score
            );
        }
    }

    #[test]
    fn verplicht_failure_blocks_regardless_of_score() {
        // Circular opening trips STR001 (verplicht); everything else passes
        let text = "Voorlopige hechtenis voorafgaand aan de inhoudelijke behandeling \
                    van een strafzaak op grond van Sv.";
        let result = engine()
            .evaluate(text, "voorlopige hechtenis", Categorie::Proces, &proces_context())
            .unwrap();
        assert!(result.has_critical());
        assert!(!result.is_acceptable);
        // The weighted score alone would have cleared the hard minimum
        assert!(result.overall_score >= ValidationSettings::default().hard_min_score);
    }

    #[test]
    fn empty_text_fails_structural_rules_with_score_zero() {
        let result = engine()
            .evaluate("", "voorlopige hechtenis", Categorie::Proces, &proces_context())
            .unwrap();
        assert_eq!(result.overall_score, 0.0);
        assert!(!result.is_acceptable);
        assert!(result.violations.iter().any(|v| v.rule_id == LEGE_TEKST));
        assert!(result.violations.iter().any(|v| v.rule_id == "STR001"));
        assert!(result.violations.iter().any(|v| v.rule_id == "STR002"));
    }

    #[test]
    fn empty_term_is_rejected_as_input_error() {
        let err = engine()
            .evaluate(GOOD_TEXT, "  ", Categorie::Proces, &proces_context())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn no_applicable_rules_is_reported_as_violation() {
        let only_wettelijk = Rule {
            id: "X001".to_string(),
            naam: "test".to_string(),
            omschrijving: "test".to_string(),
            melding: "test".to_string(),
            suggestie: None,
            weight: 1.0,
            priority: RulePriority::Midden,
            category: RuleCategory::Coherentie,
            applicability: Applicability::Tags(BTreeSet::from(["wettelijk".to_string()])),
            detection: Detection::Patterns {
                patterns: vec![
                    RegexBuilder::new(r"\.").case_insensitive(true).build().unwrap(),
                ],
                polarity: PatternPolarity::Require,
            },
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec![],
        };
        let engine = ValidationEngine::new(
            Arc::new(RuleRegistry::from_rules(vec![only_wettelijk]).unwrap()),
            ValidationSettings::default(),
        );

        // Candidate without statutory context: nothing applies
        let result = engine
            .evaluate(GOOD_TEXT, "begrip", Categorie::Proces, &ContextSet::new())
            .unwrap();
        assert_eq!(result.overall_score, 0.0);
        assert!(!result.is_acceptable);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule_id, GEEN_REGELS);
    }

    #[test]
    fn violations_are_sorted_by_priority_then_weight() {
        // Trip a verplicht rule (AIK001), a hoog rule (ESS001) and a laag
        // rule (CON002) in one text
        let text = "Dit is als een AI gemaakte omschrijving van maatregelen, etc. \
                    binnen het Wetboek van Strafvordering Sv.";
        let result = engine()
            .evaluate(text, "dwangmiddel", Categorie::Entiteit, &proces_context())
            .unwrap();
        let severities: Vec<Severity> = result.violations.iter().map(|v| v.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(severities, sorted, "violations not priority-sorted: {severities:?}");
        assert!(result.violations.iter().any(|v| v.severity == Severity::Critical));
    }

    #[test]
    fn borderline_band_is_flagged() {
        // A single always-failing graded rule puts the score inside the band
        let graded = Rule {
            id: "G001".to_string(),
            naam: "lengte".to_string(),
            omschrijving: "lengte".to_string(),
            melding: "buiten band".to_string(),
            suggestie: None,
            weight: 1.0,
            priority: RulePriority::Hoog,
            category: RuleCategory::Structuur,
            applicability: Applicability::All,
            detection: Detection::Delegate(crate::evaluators::DelegateCheck::LengteBand {
                min_woorden: 10,
                max_woorden: 20,
            }),
            voorbeeld_goed: vec![],
            voorbeeld_fout: vec![],
        };
        let engine = ValidationEngine::new(
            Arc::new(RuleRegistry::from_rules(vec![graded]).unwrap()),
            ValidationSettings::default(),
        );
        // 6 words of 10 minimum: graded score 0.6, inside [0.5, 0.7)
        let result = engine
            .evaluate(
                "een twee drie vier vijf zes",
                "begrip",
                Categorie::Overig,
                &ContextSet::new(),
            )
            .unwrap();
        assert!((result.overall_score - 0.6).abs() < 1e-9);
        assert!(result.borderline);
        assert!(!result.is_acceptable);
    }

    #[test]
    fn determinism_same_input_same_result() {
        let engine = engine();
        let first = engine
            .evaluate(GOOD_TEXT, "voorlopige hechtenis", Categorie::Proces, &proces_context())
            .unwrap();
        let second = engine
            .evaluate(GOOD_TEXT, "voorlopige hechtenis", Categorie::Proces, &proces_context())
            .unwrap();
        assert_eq!(first, second);
    }
}
