//! Orchestration value objects

use crate::entities::Definition;
use crate::value_objects::{DuplicateMatch, ValidationResult};
use serde::{Deserialize, Serialize};

/// Phase of one generation attempt
///
/// Phases run strictly in sequence per attempt; cancellation is only
/// observed on phase boundaries so a single phase's external side effects
/// complete or fail atomically from the orchestrator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationPhase {
    /// Attempt accepted, nothing ran yet
    Started,
    /// External generator call in flight
    Generating,
    /// External cleaner call in flight
    Cleaning,
    /// Rule evaluation (CPU-bound, synchronous)
    Validating,
    /// Duplicate lookup against the repository
    DuplicateChecking,
    /// Gate policy decision
    GateDeciding,
}

impl std::fmt::Display for OrchestrationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Started => "started",
            Self::Generating => "generating",
            Self::Cleaning => "cleaning",
            Self::Validating => "validating",
            Self::DuplicateChecking => "duplicate_checking",
            Self::GateDeciding => "gate_deciding",
        };
        write!(f, "{name}")
    }
}

/// Value Object: Outcome of an Orchestration Run
///
/// Carries the best-scoring iteration's definition (not necessarily the
/// last), its validation result, the duplicates found for the term and how
/// many content-quality iterations were spent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// The persisted definition from the best-scoring iteration
    pub definition: Definition,
    /// Validation result of that iteration
    pub validation: ValidationResult,
    /// Duplicate candidates found for the term (cached per run)
    pub duplicates: Vec<DuplicateMatch>,
    /// Content-quality iterations consumed
    pub iterations_used: u32,
    /// Whether the gate accepted the definition for its requested status
    pub accepted: bool,
}
