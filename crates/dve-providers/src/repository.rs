//! In-memory definition repository
//!
//! Stores definition records as an arena indexed by id, reconstructing
//! version chains by following `previous_version_id` back-references. No
//! uniqueness constraint is enforced on (begrip, context, categorie):
//! the version chain legitimately produces multiple active rows, and
//! uniqueness is an application-level policy owned by the duplicate
//! detector.

use async_trait::async_trait;
use dve_domain::ports::DefinitionRepository;
use dve_domain::{Categorie, ContextSet, Definition, Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Thread-safe in-memory repository
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<HashMap<String, Definition>>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with records
    pub async fn with_records(records: impl IntoIterator<Item = Definition>) -> Self {
        let repository = Self::new();
        {
            let mut store = repository.records.write().await;
            for record in records {
                store.insert(record.id.clone(), record);
            }
        }
        repository
    }

    /// Number of stored records, archived included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Archive a record in place, preserving lineage
    pub async fn archive(&self, id: &str) -> Result<()> {
        let mut store = self.records.write().await;
        match store.get_mut(id) {
            Some(record) => {
                record.archive();
                Ok(())
            }
            None => Err(Error::repository(format!("unknown definition id: {id}"))),
        }
    }
}

#[async_trait]
impl DefinitionRepository for MemoryRepository {
    async fn find_candidates(
        &self,
        context: &ContextSet,
        categorie: Categorie,
        limit: usize,
    ) -> Result<Vec<Definition>> {
        let store = self.records.read().await;
        let mut candidates: Vec<Definition> = store
            .values()
            .filter(|record| !record.is_archived())
            .filter(|record| record.context.shares_organisatorisch(context))
            .cloned()
            .collect();
        // Most recently updated first; id as deterministic tie-break
        candidates.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        candidates.truncate(limit);
        tracing::debug!(
            count = candidates.len(),
            categorie = %categorie,
            "candidate pool assembled"
        );
        Ok(candidates)
    }

    async fn find_exact(
        &self,
        begrip: &str,
        context: &ContextSet,
        categorie: Categorie,
    ) -> Result<Vec<Definition>> {
        let needle = begrip.trim().to_lowercase();
        let store = self.records.read().await;
        let mut hits: Vec<Definition> = store
            .values()
            .filter(|record| !record.is_archived())
            .filter(|record| record.categorie == categorie)
            .filter(|record| record.begrip.trim().to_lowercase() == needle)
            .filter(|record| record.context == *context)
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(hits)
    }

    async fn save(&self, definition: Definition) -> Result<String> {
        let id = definition.id.clone();
        self.records.write().await.insert(id.clone(), definition);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Definition>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn get_version_chain(&self, id: &str) -> Result<Vec<Definition>> {
        let store = self.records.read().await;
        let mut chain = Vec::new();
        let mut cursor = store.get(id);
        while let Some(record) = cursor {
            // A cycle would mean corrupted data; bail out instead of looping
            if chain.iter().any(|r: &Definition| r.id == record.id) {
                return Err(Error::repository(format!(
                    "version chain cycle detected at {}",
                    record.id
                )));
            }
            chain.push(record.clone());
            cursor = record
                .previous_version_id
                .as_deref()
                .and_then(|prev| store.get(prev));
        }
        chain.reverse();
        Ok(chain)
    }
}
