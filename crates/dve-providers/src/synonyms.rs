//! Static synonym table

use async_trait::async_trait;
use dve_domain::ports::SynonymLookup;
use dve_domain::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Synonym lookup backed by a fixed table
///
/// Groups are symmetric: every member of a group maps to all other members.
/// Lookup is case-insensitive; returned synonyms keep their table casing.
#[derive(Debug, Default)]
pub struct StaticSynonymLookup {
    table: BTreeMap<String, BTreeSet<String>>,
}

impl StaticSynonymLookup {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from synonym groups
    pub fn from_groups<I, G, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for group in groups {
            let members: Vec<String> = group.into_iter().map(Into::into).collect();
            for member in &members {
                let entry = table.entry(member.to_lowercase()).or_default();
                for other in &members {
                    if other != member {
                        entry.insert(other.clone());
                    }
                }
            }
        }
        Self { table }
    }
}

#[async_trait]
impl SynonymLookup for StaticSynonymLookup {
    async fn synonyms_of(&self, term: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .table
            .get(&term.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}
