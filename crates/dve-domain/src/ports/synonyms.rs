//! Synonym lookup port

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Optional Synonym Table Interface
///
/// Supplies cross-term matches for duplicate detection ("raadsman" vs
/// "advocaat"). The port is optional: when no implementation is wired, the
/// detector degrades to exact and fuzzy matching only.
#[async_trait]
pub trait SynonymLookup: Send + Sync {
    /// Synonyms of a term, excluding the term itself
    ///
    /// # Arguments
    /// * `term` - The begrip to look up
    ///
    /// # Returns
    /// Ok(set) of synonym strings; empty when the term is unknown
    async fn synonyms_of(&self, term: &str) -> Result<BTreeSet<String>>;
}
