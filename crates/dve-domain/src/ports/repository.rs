//! Definition storage port

use crate::entities::Definition;
use crate::error::Result;
use crate::value_objects::{Categorie, ContextSet};
use async_trait::async_trait;

/// Durable Definition Storage Interface
///
/// The repository is the only collaborator that performs durable writes.
/// It stores definition records as an arena indexed by id; version chains
/// are reconstructed by following `previous_version_id` back-references.
///
/// Storage does NOT enforce uniqueness of (begrip, context, categorie):
/// the version chain legitimately produces multiple non-archived rows for
/// the same tuple, and uniqueness is an application-level policy owned by
/// the duplicate detector.
#[async_trait]
pub trait DefinitionRepository: Send + Sync {
    /// Fetch candidate records for fuzzy duplicate detection.
    ///
    /// Returns non-archived records sharing at least one organizational
    /// context tag with `context`, most recently updated first, capped at
    /// `limit`.
    ///
    /// # Arguments
    /// * `context` - Context of the new definition request
    /// * `categorie` - Categorie of the request, for provider-side narrowing
    /// * `limit` - Upper bound on the candidate pool size
    async fn find_candidates(
        &self,
        context: &ContextSet,
        categorie: Categorie,
        limit: usize,
    ) -> Result<Vec<Definition>>;

    /// Fetch non-archived records with an identical (begrip, full context,
    /// categorie) tuple. Begrip comparison is case-insensitive; context
    /// comparison is order-insensitive per list.
    async fn find_exact(
        &self,
        begrip: &str,
        context: &ContextSet,
        categorie: Categorie,
    ) -> Result<Vec<Definition>>;

    /// Persist a definition record
    ///
    /// # Returns
    /// Ok(id) of the stored record
    async fn save(&self, definition: Definition) -> Result<String>;

    /// Fetch a single record by id
    async fn get(&self, id: &str) -> Result<Option<Definition>>;

    /// Reconstruct the version chain ending at `id`, oldest first.
    ///
    /// Follows `previous_version_id` back-references; archived records are
    /// included because lineage must survive soft deletion.
    async fn get_version_chain(&self, id: &str) -> Result<Vec<Definition>>;
}
