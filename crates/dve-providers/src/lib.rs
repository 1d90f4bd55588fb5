//! Port implementations
//!
//! Concrete providers for the domain ports: an in-memory definition
//! repository with version chains, a static synonym table, a basic text
//! cleaner and a scripted generator. These back local development and the
//! test suites; production deployments wire their own implementations
//! against the same port traits.

/// Text cleaning providers
pub mod cleaner;
/// Definition generation providers
pub mod generator;
/// Definition storage providers
pub mod repository;
/// Synonym lookup providers
pub mod synonyms;

pub use cleaner::BasicCleaner;
pub use generator::ScriptedGenerator;
pub use repository::MemoryRepository;
pub use synonyms::StaticSynonymLookup;
