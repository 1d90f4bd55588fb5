//! Rule Registry
//!
//! Holds the active rule set as an immutable snapshot. Reload builds a
//! complete new snapshot from the declarative source and swaps it in
//! atomically; readers holding the previous snapshot keep a consistent
//! view and never observe a half-updated registry.

use super::builtin::builtin_rules;
use super::loader::{self, LoadReport};
use super::Rule;
use arc_swap::ArcSwap;
use dve_domain::{Categorie, ContextSet, Error, Result};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable snapshot of loaded rules
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Arc<Rule>>,
}

impl RuleSet {
    /// Build a snapshot from loaded rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of loaded rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are loaded
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Option<&Arc<Rule>> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// All rules, load order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }

    /// Rules applicable to a candidate, deterministically ordered:
    /// priority descending, then weight descending, then id ascending.
    pub fn applicable_rules(&self, categorie: Categorie, context: &ContextSet) -> Vec<Arc<Rule>> {
        let mut applicable: Vec<Arc<Rule>> = self
            .rules
            .iter()
            .filter(|r| r.applicability.applies_to(categorie, context))
            .cloned()
            .collect();
        applicable.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| {
                    b.weight
                        .partial_cmp(&a.weight)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        applicable
    }
}

/// Declarative source the registry (re)loads from
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// The builtin standard rule tables
    Builtin,
    /// A directory of YAML rule files, replacing the builtin set
    Directory(PathBuf),
    /// A fixed rule list supplied programmatically; reload is a no-op
    Static(Vec<Rule>),
}

/// Process-wide rule registry with explicit reload lifecycle
///
/// Constructed explicitly and passed in where needed; there is no global
/// instance. `reload` produces a new snapshot from the same source and
/// swaps it wholesale.
pub struct RuleRegistry {
    source: RuleSource,
    snapshot: ArcSwap<RuleSet>,
}

impl RuleRegistry {
    /// Load a registry from a declarative source.
    ///
    /// Malformed rule definitions are rejected individually and reported;
    /// a completely empty resulting registry is a fatal configuration
    /// error, never silently tolerated.
    pub fn load(source: RuleSource) -> Result<(Self, LoadReport)> {
        let (rules, report) = Self::build(&source)?;
        if rules.is_empty() {
            return Err(Error::configuration(format!(
                "rule registry is empty after loading ({} definition(s) rejected)",
                report.rejected.len()
            )));
        }
        let registry = Self {
            source,
            snapshot: ArcSwap::from_pointee(RuleSet::new(rules)),
        };
        Ok((registry, report))
    }

    /// Load the builtin standard rule set
    pub fn builtin() -> Result<Self> {
        let (registry, _report) = Self::load(RuleSource::Builtin)?;
        Ok(registry)
    }

    /// Load a registry from a fixed rule list
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self> {
        let (registry, _report) = Self::load(RuleSource::Static(rules))?;
        Ok(registry)
    }

    /// Rebuild the snapshot from the source and swap it in atomically.
    ///
    /// On failure (including an empty result) the previous snapshot stays
    /// active.
    pub fn reload(&self) -> Result<LoadReport> {
        let (rules, report) = Self::build(&self.source)?;
        if rules.is_empty() {
            return Err(Error::configuration(
                "reload produced an empty rule registry; previous snapshot retained",
            ));
        }
        tracing::info!(
            loaded = report.loaded,
            rejected = report.rejected.len(),
            "rule registry reloaded"
        );
        self.snapshot.store(Arc::new(RuleSet::new(rules)));
        Ok(report)
    }

    /// Current snapshot; stable for the lifetime of the returned Arc
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.snapshot.load_full()
    }

    /// Convenience passthrough to the current snapshot
    pub fn applicable_rules(&self, categorie: Categorie, context: &ContextSet) -> Vec<Arc<Rule>> {
        self.snapshot().applicable_rules(categorie, context)
    }

    fn build(source: &RuleSource) -> Result<(Vec<Rule>, LoadReport)> {
        match source {
            RuleSource::Builtin => {
                let rules = builtin_rules()?;
                let report = LoadReport {
                    loaded: rules.len(),
                    rejected: Vec::new(),
                };
                Ok((rules, report))
            }
            RuleSource::Directory(dir) => loader::load_directory(dir),
            RuleSource::Static(rules) => {
                let report = LoadReport {
                    loaded: rules.len(),
                    rejected: Vec::new(),
                };
                Ok((rules.clone(), report))
            }
        }
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("source", &self.source)
            .field("rules", &self.snapshot.load().len())
            .finish()
    }
}
