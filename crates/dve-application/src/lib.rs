//! Application layer
//!
//! Pure domain services (gate policy, feedback generation, similarity
//! scoring) and the use cases that cross the async boundary (duplicate
//! detection, orchestration). The pure services never perform I/O; all
//! external calls are owned by the orchestrator and the duplicate
//! detector, behind the domain port traits.

/// Pure domain services
pub mod domain_services;
/// Use cases over the domain ports
pub mod use_cases;

pub use domain_services::feedback::{FeedbackGenerator, FeedbackSettings};
pub use domain_services::gate::{GatePolicy, GateSettings};
pub use domain_services::similarity::begrip_similarity;
pub use use_cases::duplicate_detector::{DuplicateDetector, DuplicateSettings};
pub use use_cases::orchestrator::{Orchestrator, OrchestratorSettings};
