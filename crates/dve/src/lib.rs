//! # Definitie Validatie Engine
//!
//! Validation, duplicate detection and gated lifecycle orchestration for
//! short legal-definition texts in governmental justice organizations.
//!
//! A (term, context, categorie) request flows through an external
//! generator and cleaner, the weighted rule-based validation engine, the
//! fuzzy duplicate detector and the approval gate, looping with targeted
//! feedback until the definition is accepted or the iteration budget runs
//! out.
//!
//! ## Example
//!
//! ```ignore
//! use dve::{Categorie, ContextSet, EngineBuilder};
//!
//! let engine = EngineBuilder::new()
//!     .with_generator(my_generator)
//!     .build()?;
//!
//! let context = ContextSet::new().with_wettelijk(["Sv"]);
//! let result = engine
//!     .orchestrate("voorlopige hechtenis", &context, Categorie::Proces, None)
//!     .await?;
//! println!("accepted: {} (score {:.2})", result.accepted, result.validation.overall_score);
//! ```
//!
//! ## Architecture
//!
//! The workspace follows a layered design:
//!
//! - `domain` - entities, value objects, error taxonomy and port traits
//! - `validate` - rule registry and the pure validation engine
//! - `application` - gate policy, feedback, duplicate detection, orchestration
//! - `infrastructure` - configuration loading and logging
//! - `providers` - in-memory and static port implementations

mod engine;

/// Domain layer - core business types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use dve_domain::*;
}

/// Application layer - services and use cases
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use dve_application::*;
}

/// Infrastructure layer - configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use dve_infrastructure::*;
}

/// Providers - port implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use dve_providers::*;
}

/// Validation - rule registry and engine
///
/// Re-exports from the validate crate for convenience
pub mod validate {
    pub use dve_validate::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the engine facade at the crate root
pub use engine::{Engine, EngineBuilder};
