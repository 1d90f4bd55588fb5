//! Immutable value objects
//!
//! Value objects are defined by their attributes, carry no identity and are
//! never mutated after construction. They are created fresh per operation
//! and owned by the caller.

mod categorie;
mod context;
mod duplicate;
mod feedback;
mod gate;
mod orchestration;
mod validation;

pub use categorie::Categorie;
pub use context::ContextSet;
pub use duplicate::{DuplicateMatch, MatchKind};
pub use feedback::{FeedbackItem, FeedbackKind};
pub use gate::{GateDecision, GateReason};
pub use orchestration::{OrchestrationPhase, OrchestrationResult};
pub use validation::{RuleViolation, Severity, ValidationResult};
