//! Approval Gate Policy
//!
//! Pure decision function over the status state machine. The invariants
//! hold independent of the caller: no UI path can move a definition to
//! established without a reviewed status, a clearing score, zero critical
//! violations and at least one context.

use dve_domain::constants::DEFAULT_HARD_MIN_SCORE;
use dve_domain::{ContextSet, DefinitionStatus, GateDecision, GateReason, ValidationResult};
use serde::{Deserialize, Serialize};

/// Gate thresholds and toggles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GateSettings {
    /// Minimum score for the transition to established
    pub hard_min_score: f64,
    /// Whether at least one non-empty context list is required
    pub min_one_context_required: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            hard_min_score: DEFAULT_HARD_MIN_SCORE,
            min_one_context_required: true,
        }
    }
}

/// The approval state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct GatePolicy {
    settings: GateSettings,
}

impl GatePolicy {
    /// Create a policy with the given settings
    pub fn new(settings: GateSettings) -> Self {
        Self { settings }
    }

    /// Decide whether a status transition may proceed.
    ///
    /// Transitions to `Established` additionally require a clearing
    /// validation score, zero critical violations and at least one
    /// non-empty context list. Every denial carries an enumerable reason.
    pub fn decide(
        &self,
        validation: &ValidationResult,
        context: &ContextSet,
        requested: DefinitionStatus,
        current: DefinitionStatus,
    ) -> GateDecision {
        if requested == DefinitionStatus::Established {
            return self.decide_establishment(validation, context, current);
        }

        if current.can_transition_to(requested) {
            GateDecision::allow()
        } else {
            GateDecision::deny(GateReason::InvalidTransition {
                from: current.as_tag().to_string(),
                to: requested.as_tag().to_string(),
            })
        }
    }

    fn decide_establishment(
        &self,
        validation: &ValidationResult,
        context: &ContextSet,
        current: DefinitionStatus,
    ) -> GateDecision {
        if current != DefinitionStatus::Review {
            return GateDecision::deny(GateReason::EstablishedRequiresReview {
                current: current.as_tag().to_string(),
            });
        }

        if validation.overall_score < self.settings.hard_min_score {
            return GateDecision::deny(GateReason::ScoreBelowThreshold {
                score: validation.overall_score,
                minimum: self.settings.hard_min_score,
            });
        }

        let critical = validation.critical_violations().count();
        if critical > 0 {
            return GateDecision::deny(GateReason::CriticalViolations { count: critical });
        }

        if self.settings.min_one_context_required && !context.has_any_context() {
            return GateDecision::deny(GateReason::MissingContext);
        }

        GateDecision::allow()
    }
}
