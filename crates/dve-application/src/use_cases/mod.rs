//! Use cases over the domain ports

/// Exact, fuzzy and synonym duplicate detection
pub mod duplicate_detector;
/// End-to-end generation orchestration
pub mod orchestrator;
