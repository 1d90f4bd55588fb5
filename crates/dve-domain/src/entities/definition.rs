//! The governed definition entity

use crate::value_objects::{Categorie, ContextSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a definition
///
/// The chain runs draft → review → established → archived, with archived
/// reachable from every state. There are no backward transitions: reverting
/// to draft is expressed as a new version record, never as a status
/// mutation in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionStatus {
    /// Freshly authored, not yet submitted
    Draft,
    /// Under review by the owning organization
    Review,
    /// Authoritative; protected by the gate policy
    Established,
    /// Soft-deleted; retained for version lineage
    Archived,
}

impl DefinitionStatus {
    /// Stable lowercase tag
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Established => "established",
            Self::Archived => "archived",
        }
    }

    /// Whether `target` is a valid successor in the status chain.
    ///
    /// This encodes only the shape of the chain; the score and context
    /// requirements for reaching `Established` live in the gate policy.
    pub fn can_transition_to(&self, target: DefinitionStatus) -> bool {
        use DefinitionStatus::*;
        match (self, target) {
            // Archived is reachable from every live state
            (Draft | Review | Established, Archived) => true,
            (Draft, Review) => true,
            (Review, Established) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DefinitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Entity: A Governed Definition Record
///
/// Identified by `id`; carries the begrip (term), the definition text, its
/// categorie and context scoping, the lifecycle status and the version
/// chain back-reference. Within the set of non-archived definitions,
/// multiple records may legitimately share (begrip, context, categorie):
/// uniqueness is an application-level policy owned by the duplicate
/// detector and user confirmation, not a storage constraint, because the
/// version chain produces multiple active rows differing only in
/// version_number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// The term being defined
    pub begrip: String,
    /// The definition text
    pub definitie: String,
    /// Ontological kind of the term
    pub categorie: Categorie,
    /// Context scoping (three independent tag lists)
    pub context: ContextSet,
    /// Lifecycle status
    pub status: DefinitionStatus,
    /// Version number, starting at 1
    pub version_number: u32,
    /// Back-reference forming the version chain
    pub previous_version_id: Option<String>,
    /// Weighted validation score of the stored text
    pub validation_score: f64,
    /// Serialized violation snapshot from the stored validation result
    pub validation_issues: serde_json::Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Definition {
    /// Create a fresh draft definition with a new identity
    pub fn new_draft(
        begrip: impl Into<String>,
        definitie: impl Into<String>,
        categorie: Categorie,
        context: ContextSet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            begrip: begrip.into(),
            definitie: definitie.into(),
            categorie,
            context,
            status: DefinitionStatus::Draft,
            version_number: 1,
            previous_version_id: None,
            validation_score: 0.0,
            validation_issues: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derive the next version: a new record pointing back at this one.
    ///
    /// The new record starts in draft with a fresh identity; the persisted
    /// original is never mutated in place.
    pub fn new_version(&self, definitie: impl Into<String>, context: ContextSet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            begrip: self.begrip.clone(),
            definitie: definitie.into(),
            categorie: self.categorie,
            context,
            status: DefinitionStatus::Draft,
            version_number: self.version_number + 1,
            previous_version_id: Some(self.id.clone()),
            validation_score: 0.0,
            validation_issues: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// Soft-delete: archive the record, preserving version lineage
    pub fn archive(&mut self) {
        self.status = DefinitionStatus::Archived;
        self.updated_at = Utc::now();
    }

    /// Whether this record has been soft-deleted
    pub fn is_archived(&self) -> bool {
        self.status == DefinitionStatus::Archived
    }

    /// Attach a validation outcome to the record
    pub fn with_validation(
        mut self,
        score: f64,
        issues: serde_json::Value,
    ) -> Self {
        self.validation_score = score;
        self.validation_issues = issues;
        self.updated_at = Utc::now();
        self
    }
}
