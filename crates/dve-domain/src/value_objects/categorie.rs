//! Ontological category of a term

use serde::{Deserialize, Serialize};

/// Value Object: Ontological Kind of a Term
///
/// The categorie scopes which validation rules apply and is part of the
/// exact-match key during duplicate detection: two definitions with the same
/// begrip but different categorie are distinct records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Categorie {
    /// A thing or type (e.g., "verdachte", "vonnis")
    Entiteit,
    /// An activity or procedure (e.g., "dagvaarding")
    Proces,
    /// An outcome produced by a process (e.g., "uitspraak")
    Resultaat,
    /// Terms that fit none of the above kinds
    Overig,
}

impl Categorie {
    /// Stable lowercase tag used in rule applicability sets
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Entiteit => "entiteit",
            Self::Proces => "proces",
            Self::Resultaat => "resultaat",
            Self::Overig => "overig",
        }
    }

    /// Parse a tag produced by [`Categorie::as_tag`]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "entiteit" => Some(Self::Entiteit),
            "proces" => Some(Self::Proces),
            "resultaat" => Some(Self::Resultaat),
            "overig" => Some(Self::Overig),
            _ => None,
        }
    }
}

impl std::fmt::Display for Categorie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}
