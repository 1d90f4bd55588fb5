//! Duplicate Detection Use Case
//!
//! Searches existing records for exact, fuzzy and synonym matches against a
//! proposed term. Storage failures propagate as a distinct error; the
//! detector never answers "no duplicates" when it could not look.

use crate::domain_services::similarity::begrip_similarity;
use dve_domain::constants::{
    DEFAULT_CANDIDATE_POOL_LIMIT, DEFAULT_FUZZY_THRESHOLD, DEFAULT_NEAR_DUPLICATE_THRESHOLD,
};
use dve_domain::ports::{DefinitionRepository, SynonymLookup};
use dve_domain::{Categorie, ContextSet, DuplicateMatch, Error, MatchKind, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Synonym hits always present in the near-duplicate tier
const SYNONYM_FLOOR: f64 = 0.95;

/// Duplicate detection thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DuplicateSettings {
    /// Similarity below this value is discarded
    pub fuzzy_threshold: f64,
    /// Similarity at or above this value is a near-duplicate
    pub near_duplicate_threshold: f64,
    /// Upper bound on the fuzzy candidate pool
    pub candidate_pool_limit: usize,
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            near_duplicate_threshold: DEFAULT_NEAR_DUPLICATE_THRESHOLD,
            candidate_pool_limit: DEFAULT_CANDIDATE_POOL_LIMIT,
        }
    }
}

/// Exact, fuzzy and synonym duplicate detector
pub struct DuplicateDetector {
    repository: Arc<dyn DefinitionRepository>,
    synonyms: Option<Arc<dyn SynonymLookup>>,
    settings: DuplicateSettings,
}

impl DuplicateDetector {
    /// Create a detector over a repository, without synonym support
    pub fn new(repository: Arc<dyn DefinitionRepository>, settings: DuplicateSettings) -> Self {
        Self {
            repository,
            synonyms: None,
            settings,
        }
    }

    /// Wire an optional synonym lookup
    pub fn with_synonyms(mut self, synonyms: Arc<dyn SynonymLookup>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    /// The detector's thresholds
    pub fn settings(&self) -> &DuplicateSettings {
        &self.settings
    }

    /// Find duplicate candidates for a proposed (term, context, categorie).
    ///
    /// Exact hits are found first on the full tuple. The fuzzy stage then
    /// scores begrip similarity over a bounded candidate pool sharing
    /// organizational context, supplemented by synonym-table hits. Results
    /// are ordered by descending similarity, ties broken by most recently
    /// updated record first; the ordering is stable across calls with no
    /// intervening writes.
    pub async fn find(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
    ) -> Result<Vec<DuplicateMatch>> {
        if term.trim().is_empty() {
            return Err(Error::validation("begrip must not be empty"));
        }

        let exact_hits = self
            .repository
            .find_exact(term, context, categorie)
            .await
            .map_err(|err| {
                Error::duplicate_detection_with_source("exact duplicate lookup failed", err)
            })?;

        let mut matches: Vec<DuplicateMatch> = exact_hits
            .iter()
            .map(|record| DuplicateMatch {
                definition_id: record.id.clone(),
                begrip: record.begrip.clone(),
                similarity: 1.0,
                kind: MatchKind::Exact,
                updated_at: record.updated_at,
            })
            .collect();
        let matched_ids: BTreeSet<String> =
            exact_hits.iter().map(|record| record.id.clone()).collect();

        let candidates = self
            .repository
            .find_candidates(context, categorie, self.settings.candidate_pool_limit)
            .await
            .map_err(|err| {
                Error::duplicate_detection_with_source("candidate pool lookup failed", err)
            })?;

        let synonyms = match &self.synonyms {
            Some(lookup) => lookup.synonyms_of(term).await.map_err(|err| {
                Error::duplicate_detection_with_source("synonym lookup failed", err)
            })?,
            None => BTreeSet::new(),
        };
        let synonyms_lower: BTreeSet<String> =
            synonyms.iter().map(|s| s.to_lowercase()).collect();

        for candidate in candidates {
            if matched_ids.contains(&candidate.id) {
                continue;
            }
            let mut similarity = begrip_similarity(term, &candidate.begrip);
            let kind = if synonyms_lower.contains(&candidate.begrip.trim().to_lowercase()) {
                similarity = similarity.max(SYNONYM_FLOOR);
                MatchKind::Synonym
            } else {
                MatchKind::Fuzzy
            };
            if similarity < self.settings.fuzzy_threshold {
                continue;
            }
            matches.push(DuplicateMatch {
                definition_id: candidate.id,
                begrip: candidate.begrip,
                similarity,
                kind,
                updated_at: candidate.updated_at,
            });
        }

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| a.definition_id.cmp(&b.definition_id))
        });

        tracing::debug!(
            term,
            matches = matches.len(),
            near_duplicates = matches
                .iter()
                .filter(|m| m.is_near_duplicate(self.settings.near_duplicate_threshold))
                .count(),
            "duplicate detection completed"
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dve_domain::Definition;
    use dve_providers::{MemoryRepository, StaticSynonymLookup};

    fn record(begrip: &str, categorie: Categorie, org: &str) -> Definition {
        Definition::new_draft(
            begrip,
            "Vrijheidsbeneming voorafgaand aan de behandeling van een strafzaak.",
            categorie,
            ContextSet::new().with_organisatorisch([org]),
        )
    }

    fn om_context() -> ContextSet {
        ContextSet::new().with_organisatorisch(["OM"])
    }

    async fn detector_with(records: Vec<Definition>) -> DuplicateDetector {
        let repo = Arc::new(MemoryRepository::with_records(records).await);
        DuplicateDetector::new(repo, DuplicateSettings::default())
    }

    #[tokio::test]
    async fn exact_hit_comes_back_with_similarity_one() {
        let detector = detector_with(vec![record(
            "voorlopige hechtenis",
            Categorie::Proces,
            "OM",
        )])
        .await;

        let matches = detector
            .find("Voorlopige Hechtenis", &om_context(), Categorie::Proces)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Exact);
        assert_eq!(matches[0].similarity, 1.0);
    }

    #[tokio::test]
    async fn categorie_is_part_of_the_exact_key() {
        // Identical begrip and context, different categorie: no exact hit,
        // but the fuzzy stage still surfaces the identical term string
        let detector = detector_with(vec![record(
            "voorlopige hechtenis",
            Categorie::Entiteit,
            "OM",
        )])
        .await;

        let matches = detector
            .find("voorlopige hechtenis", &om_context(), Categorie::Proces)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Fuzzy);
        assert_eq!(matches[0].similarity, 1.0);
    }

    #[tokio::test]
    async fn fuzzy_matches_are_tiered_and_low_scores_discarded() {
        let detector = detector_with(vec![
            record("voorlopige hechtenis", Categorie::Proces, "OM"),
            record("kantonrechter", Categorie::Entiteit, "OM"),
        ])
        .await;

        let matches = detector
            .find("voorlopige hechtennis", &om_context(), Categorie::Proces)
            .await
            .unwrap();
        // Unrelated term falls below the fuzzy threshold
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].begrip, "voorlopige hechtenis");
        assert!(matches[0].similarity >= 0.7);
    }

    #[tokio::test]
    async fn synonym_hits_land_in_the_near_duplicate_tier() {
        let repo = Arc::new(
            MemoryRepository::with_records(vec![record("advocaat", Categorie::Entiteit, "OM")])
                .await,
        );
        let synonyms = Arc::new(StaticSynonymLookup::from_groups([["raadsman", "advocaat"]]));
        let detector = DuplicateDetector::new(repo, DuplicateSettings::default())
            .with_synonyms(synonyms);

        let matches = detector
            .find("raadsman", &om_context(), Categorie::Entiteit)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, MatchKind::Synonym);
        assert!(matches[0].is_near_duplicate(0.9));
    }

    #[tokio::test]
    async fn without_synonym_port_detection_degrades_gracefully() {
        let detector =
            detector_with(vec![record("advocaat", Categorie::Entiteit, "OM")]).await;

        let matches = detector
            .find("raadsman", &om_context(), Categorie::Entiteit)
            .await
            .unwrap();
        // "raadsman" vs "advocaat" is below the fuzzy threshold
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn ordering_is_stable_across_calls() {
        let detector = detector_with(vec![
            record("voorlopige hechtenis", Categorie::Proces, "OM"),
            record("voorlopige hechtenis", Categorie::Proces, "OM"),
            record("voorlopige hechtennis", Categorie::Proces, "OM"),
        ])
        .await;

        let first = detector
            .find("voorlopige hechtenis", &om_context(), Categorie::Proces)
            .await
            .unwrap();
        let second = detector
            .find("voorlopige hechtenis", &om_context(), Categorie::Proces)
            .await
            .unwrap();
        assert_eq!(first, second);
        // Descending similarity
        for pair in first.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl DefinitionRepository for FailingRepository {
        async fn find_candidates(
            &self,
            _context: &ContextSet,
            _categorie: Categorie,
            _limit: usize,
        ) -> Result<Vec<Definition>> {
            Err(Error::repository("storage unavailable"))
        }

        async fn find_exact(
            &self,
            _begrip: &str,
            _context: &ContextSet,
            _categorie: Categorie,
        ) -> Result<Vec<Definition>> {
            Err(Error::repository("storage unavailable"))
        }

        async fn save(&self, _definition: Definition) -> Result<String> {
            Err(Error::repository("storage unavailable"))
        }

        async fn get(&self, _id: &str) -> Result<Option<Definition>> {
            Err(Error::repository("storage unavailable"))
        }

        async fn get_version_chain(&self, _id: &str) -> Result<Vec<Definition>> {
            Err(Error::repository("storage unavailable"))
        }
    }

    #[tokio::test]
    async fn storage_failure_propagates_never_empty() {
        let detector =
            DuplicateDetector::new(Arc::new(FailingRepository), DuplicateSettings::default());

        let err = detector
            .find("hechtenis", &om_context(), Categorie::Proces)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDetection { .. }));
    }

    #[tokio::test]
    async fn empty_term_is_an_input_error() {
        let detector = detector_with(vec![]).await;
        let err = detector
            .find("  ", &om_context(), Categorie::Proces)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
