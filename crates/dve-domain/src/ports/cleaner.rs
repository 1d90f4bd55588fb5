//! Text cleaning port

use crate::error::Result;
use async_trait::async_trait;

/// External Text Normalization Interface
///
/// Normalizes raw generated text before validation (whitespace, quoting,
/// terminal punctuation). Assumed fast and reliable; failures still follow
/// the orchestrator's retry policy for external calls.
#[async_trait]
pub trait TextCleaner: Send + Sync {
    /// Clean a candidate definition text
    ///
    /// # Arguments
    /// * `text` - Raw text as produced by the generator
    /// * `term` - The begrip, for term-aware normalization
    ///
    /// # Returns
    /// Ok(text) with the normalized definition
    async fn clean(&self, text: &str, term: &str) -> Result<String>;
}
