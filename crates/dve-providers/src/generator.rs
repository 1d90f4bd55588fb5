//! Scripted definition generator

use async_trait::async_trait;
use dve_domain::ports::DefinitionGenerator;
use dve_domain::{Categorie, ContextSet, Error, Result};
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Generator that replays a fixed script of outputs
///
/// Each call pops the next entry; an exhausted script is a generation
/// failure rather than a silent repeat, so tests notice unexpected extra
/// iterations. Used by the test suites and local development; production
/// wires an AI completion client behind the same port.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    /// Create a generator from scripted outputs, replayed in order
    pub fn new<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(outputs.into_iter().map(Into::into).collect()),
        }
    }

    /// Remaining scripted outputs
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl DefinitionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        term: &str,
        _context: &ContextSet,
        _categorie: Categorie,
        guidance: Option<&str>,
    ) -> Result<String> {
        if let Some(guidance) = guidance {
            tracing::debug!(term, guidance, "regenerating with feedback");
        }
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| Error::generation(format!("script exhausted for term '{term}'"), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_in_order_then_fails() {
        let generator = ScriptedGenerator::new(["eerste", "tweede"]);
        let context = ContextSet::new();

        let first = generator
            .generate("begrip", &context, Categorie::Overig, None)
            .await
            .unwrap();
        assert_eq!(first, "eerste");
        assert_eq!(generator.remaining().await, 1);

        let second = generator
            .generate("begrip", &context, Categorie::Overig, Some("- korter"))
            .await
            .unwrap();
        assert_eq!(second, "tweede");

        let err = generator
            .generate("begrip", &context, Categorie::Overig, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation { .. }));
    }
}
