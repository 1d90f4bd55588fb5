//! Entities with identity and lifecycle

mod definition;

pub use definition::{Definition, DefinitionStatus};
