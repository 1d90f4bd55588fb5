//! Domain layer for the Definitie Validatie Engine
//!
//! Core business types for authoring and governing legal-definition texts:
//! the governed [`Definition`] entity, the value objects produced by
//! validation and duplicate detection, the gate decision model and the port
//! contracts that external collaborators (generator, cleaner, repository,
//! synonym lookup) must implement.
//!
//! This crate is pure: no I/O, no async runtime dependency beyond the
//! `async_trait` port definitions, no framework types.

/// Domain-wide constants and default thresholds
pub mod constants;
/// Entities with identity and lifecycle
pub mod entities;
/// Error taxonomy and Result alias
pub mod error;
/// Boundary contracts implemented by external layers
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use entities::{Definition, DefinitionStatus};
pub use error::{Error, Result};
pub use ports::{DefinitionGenerator, DefinitionRepository, SynonymLookup, TextCleaner};
pub use value_objects::{
    Categorie, ContextSet, DuplicateMatch, FeedbackItem, FeedbackKind, GateDecision, GateReason,
    MatchKind, OrchestrationPhase, OrchestrationResult, RuleViolation, Severity, ValidationResult,
};
