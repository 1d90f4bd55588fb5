//! Context scoping for definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value Object: Three Independent Context Lists
///
/// A definition is scoped by up to three context kinds: organizational
/// (which organization uses the term), legal (which legal domain) and
/// statutory (which statute or code). Each list has set semantics: ordering
/// is irrelevant for equality and only matters for display, which the sorted
/// iteration of the underlying sets provides deterministically.
///
/// ## Business Rules
///
/// - Equality ignores insertion order (set comparison per kind)
/// - A definition needs at least one non-empty list before it may become
///   established ("minimum one context")
/// - Tags are compared verbatim; normalization happens upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextSet {
    /// Organizational context tags (e.g., "OM", "Rechtspraak")
    #[serde(default)]
    pub organisatorisch: BTreeSet<String>,
    /// Legal context tags (e.g., "strafrecht")
    #[serde(default)]
    pub juridisch: BTreeSet<String>,
    /// Statutory context tags (e.g., "Sv", "Sr")
    #[serde(default)]
    pub wettelijk: BTreeSet<String>,
}

impl ContextSet {
    /// Create an empty context set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add organizational tags
    pub fn with_organisatorisch<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organisatorisch.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add legal tags
    pub fn with_juridisch<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.juridisch.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add statutory tags
    pub fn with_wettelijk<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wettelijk.extend(tags.into_iter().map(Into::into));
        self
    }

    /// True when all three lists are empty
    pub fn is_empty(&self) -> bool {
        self.organisatorisch.is_empty() && self.juridisch.is_empty() && self.wettelijk.is_empty()
    }

    /// True when at least one list carries a tag ("minimum one context")
    pub fn has_any_context(&self) -> bool {
        !self.is_empty()
    }

    /// Kind tags for the non-empty lists, used by rule applicability
    pub fn kind_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if !self.organisatorisch.is_empty() {
            tags.push("organisatorisch");
        }
        if !self.juridisch.is_empty() {
            tags.push("juridisch");
        }
        if !self.wettelijk.is_empty() {
            tags.push("wettelijk");
        }
        tags
    }

    /// Whether the organizational lists share at least one tag.
    ///
    /// The fuzzy duplicate candidate pool is limited to records sharing
    /// organizational context.
    pub fn shares_organisatorisch(&self, other: &Self) -> bool {
        !self.organisatorisch.is_disjoint(&other.organisatorisch)
    }

    /// All tags across the three lists, for display
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.organisatorisch
            .iter()
            .chain(self.juridisch.iter())
            .chain(self.wettelijk.iter())
            .map(String::as_str)
    }
}
