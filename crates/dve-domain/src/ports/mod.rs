//! Domain Port Interfaces
//!
//! Defines all boundary contracts between the engine core and external
//! collaborators. Ports follow the Dependency Inversion Principle:
//! the domain defines the interfaces, outer layers implement them.
//!
//! The pure components (validation engine, gate policy, feedback generator)
//! never touch these ports; only the orchestrator and the duplicate
//! detector cross the async boundary they represent.

/// External text cleaning port
pub mod cleaner;
/// External AI completion port
pub mod generator;
/// Durable definition storage port
pub mod repository;
/// Optional synonym table port
pub mod synonyms;

pub use cleaner::TextCleaner;
pub use generator::DefinitionGenerator;
pub use repository::DefinitionRepository;
pub use synonyms::SynonymLookup;
