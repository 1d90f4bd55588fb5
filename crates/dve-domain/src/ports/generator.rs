//! Definition generation port

use crate::error::Result;
use crate::value_objects::{Categorie, ContextSet};
use async_trait::async_trait;

/// External Definition Generation Interface
///
/// Produces a candidate definition text for a (term, context, categorie)
/// request. Implementations typically call an external AI completion
/// service and may fail transiently; the orchestrator owns the retry and
/// backoff policy around this port.
///
/// # Example
///
/// ```ignore
/// let text = generator
///     .generate("voorlopige hechtenis", &context, Categorie::Proces, None)
///     .await?;
/// ```
#[async_trait]
pub trait DefinitionGenerator: Send + Sync {
    /// Generate a candidate definition text
    ///
    /// # Arguments
    /// * `term` - The begrip to define
    /// * `context` - Context scoping the definition must respect
    /// * `categorie` - Ontological kind of the term
    /// * `guidance` - Optional feedback block from a previous iteration
    ///
    /// # Returns
    /// Ok(text) with the raw generated definition, Error on provider failure
    async fn generate(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
        guidance: Option<&str>,
    ) -> Result<String>;
}
