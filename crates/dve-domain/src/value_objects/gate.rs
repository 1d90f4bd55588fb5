//! Gate decision value objects
//!
//! A denied gate is an expected, user-facing outcome, not a failure. Every
//! denial carries an enumerable reason code so the caller can render a
//! specific message and decide between "retry" and "edit and resubmit".

use serde::{Deserialize, Serialize};

/// Reason attached to a gate decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum GateReason {
    /// Transition allowed
    Approved,
    /// Target status is not a valid successor of the current status
    InvalidTransition {
        /// Current status tag
        from: String,
        /// Requested status tag
        to: String,
    },
    /// Established may only be reached from review
    EstablishedRequiresReview {
        /// Current status tag
        current: String,
    },
    /// Weighted score below the hard minimum
    ScoreBelowThreshold {
        /// Achieved score
        score: f64,
        /// Required minimum
        minimum: f64,
    },
    /// One or more verplicht rules failed
    CriticalViolations {
        /// Number of critical violations
        count: usize,
    },
    /// All three context lists are empty ("minimum one context")
    MissingContext,
}

impl GateReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "TOEGESTAAN",
            Self::InvalidTransition { .. } => "OVERGANG_ONGELDIG",
            Self::EstablishedRequiresReview { .. } => "VASTGESTELD_VEREIST_REVIEW",
            Self::ScoreBelowThreshold { .. } => "SCORE_TE_LAAG",
            Self::CriticalViolations { .. } => "KRITIEKE_BEVINDINGEN",
            Self::MissingContext => "MINIMAAL_EEN_CONTEXT",
        }
    }
}

impl std::fmt::Display for GateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "overgang toegestaan"),
            Self::InvalidTransition { from, to } => {
                write!(f, "overgang van '{from}' naar '{to}' is niet toegestaan")
            }
            Self::EstablishedRequiresReview { current } => write!(
                f,
                "vaststellen kan alleen vanuit status 'review', niet vanuit '{current}'"
            ),
            Self::ScoreBelowThreshold { score, minimum } => write!(
                f,
                "validatiescore {score:.2} ligt onder het vereiste minimum {minimum:.2}"
            ),
            Self::CriticalViolations { count } => write!(
                f,
                "{count} kritieke bevinding(en) op verplichte toetsregels"
            ),
            Self::MissingContext => write!(
                f,
                "minimaal een context (organisatorisch, juridisch of wettelijk) is vereist"
            ),
        }
    }
}

/// Value Object: Outcome of a Gate Check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Whether the requested transition may proceed
    pub allowed: bool,
    /// Specific reason, also populated on approval
    pub reason: GateReason,
}

impl GateDecision {
    /// An approving decision
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: GateReason::Approved,
        }
    }

    /// A denying decision with the given reason
    pub fn deny(reason: GateReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}
