//! Basic text cleaner

use async_trait::async_trait;
use dve_domain::ports::TextCleaner;
use dve_domain::Result;

/// Whitespace and punctuation normalization
///
/// Collapses runs of whitespace, strips wrapping quotes left by generation,
/// removes a leading "term:" echo and guarantees a terminal period. More
/// elaborate linguistic normalization belongs in an external service behind
/// the same port.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCleaner;

impl BasicCleaner {
    /// Create a cleaner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextCleaner for BasicCleaner {
    async fn clean(&self, text: &str, term: &str) -> Result<String> {
        let mut cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

        // Strip one layer of wrapping quotes
        for (open, close) in [('"', '"'), ('\u{2018}', '\u{2019}'), ('\u{201c}', '\u{201d}')] {
            if cleaned.starts_with(open) && cleaned.ends_with(close) && cleaned.len() > 1 {
                cleaned = cleaned[open.len_utf8()..cleaned.len() - close.len_utf8()]
                    .trim()
                    .to_string();
            }
        }

        // Drop a leading "term:" echo some generators produce
        let lowered = cleaned.to_lowercase();
        let prefix = format!("{}:", term.trim().to_lowercase());
        if lowered.starts_with(&prefix) {
            cleaned = cleaned[prefix.len()..].trim_start().to_string();
        }

        if !cleaned.is_empty() && !cleaned.ends_with(['.', '!', '?']) {
            cleaned.push('.');
        }

        Ok(cleaned)
    }
}
