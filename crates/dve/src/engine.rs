//! Engine facade
//!
//! Wires configuration, the rule registry and the port implementations
//! into one entry point exposing the core operations: validate, check
//! duplicates, orchestrate, decide the gate and reload rules.

use dve_application::{
    DuplicateDetector, FeedbackGenerator, GatePolicy, Orchestrator,
};
use dve_domain::ports::{
    DefinitionGenerator, DefinitionRepository, SynonymLookup, TextCleaner,
};
use dve_domain::{
    Categorie, ContextSet, DefinitionStatus, DuplicateMatch, Error, GateDecision,
    OrchestrationResult, Result, ValidationResult,
};
use dve_infrastructure::AppConfig;
use dve_providers::{BasicCleaner, MemoryRepository};
use dve_validate::{LoadReport, RuleRegistry, RuleSource, ValidationEngine};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Builder for the engine facade
///
/// The generator port must be wired explicitly; cleaner and repository
/// default to the basic cleaner and the in-memory repository, synonym
/// lookup is optional.
#[derive(Default)]
pub struct EngineBuilder {
    config: AppConfig,
    generator: Option<Arc<dyn DefinitionGenerator>>,
    cleaner: Option<Arc<dyn TextCleaner>>,
    repository: Option<Arc<dyn DefinitionRepository>>,
    synonyms: Option<Arc<dyn SynonymLookup>>,
    cancel: Option<CancellationToken>,
}

impl EngineBuilder {
    /// Start a builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a loaded configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Wire the definition generator port (required)
    pub fn with_generator(mut self, generator: Arc<dyn DefinitionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Wire a text cleaner port
    pub fn with_cleaner(mut self, cleaner: Arc<dyn TextCleaner>) -> Self {
        self.cleaner = Some(cleaner);
        self
    }

    /// Wire a definition repository port
    pub fn with_repository(mut self, repository: Arc<dyn DefinitionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Wire the optional synonym lookup port
    pub fn with_synonyms(mut self, synonyms: Arc<dyn SynonymLookup>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    /// Attach a cancellation token for orchestration runs
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// `Error::Configuration` when the configuration fails validation, no
    /// generator is wired, or the rule source produces an empty registry.
    pub fn build(self) -> Result<Engine> {
        self.config.validate()?;

        let generator = self
            .generator
            .ok_or_else(|| Error::configuration("no definition generator wired"))?;
        let cleaner = self
            .cleaner
            .unwrap_or_else(|| Arc::new(BasicCleaner::new()));
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(MemoryRepository::new()));

        let registry = match &self.config.rules.rules_dir {
            Some(dir) => {
                let (registry, report) =
                    RuleRegistry::load(RuleSource::Directory(dir.clone()))?;
                if !report.rejected.is_empty() {
                    tracing::warn!(
                        loaded = report.loaded,
                        rejected = report.rejected.len(),
                        "some rule definitions were rejected at load"
                    );
                }
                Arc::new(registry)
            }
            None => Arc::new(RuleRegistry::builtin()?),
        };

        let validation_engine = Arc::new(ValidationEngine::new(
            registry.clone(),
            self.config.validation_settings(),
        ));

        let mut detector =
            DuplicateDetector::new(repository.clone(), self.config.duplicate_settings());
        if let Some(synonyms) = self.synonyms {
            detector = detector.with_synonyms(synonyms);
        }
        let detector = Arc::new(detector);

        let gate = GatePolicy::new(self.config.gate_settings());
        let feedback = FeedbackGenerator::new(self.config.feedback_settings());

        let mut orchestrator = Orchestrator::new(
            generator,
            cleaner,
            repository.clone(),
            validation_engine.clone(),
            detector.clone(),
            gate,
            feedback,
            self.config.orchestrator_settings(),
        );
        if let Some(cancel) = self.cancel {
            orchestrator = orchestrator.with_cancellation(cancel);
        }

        Ok(Engine {
            registry,
            validation_engine,
            detector,
            gate,
            orchestrator,
            repository,
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// The engine facade
pub struct Engine {
    registry: Arc<RuleRegistry>,
    validation_engine: Arc<ValidationEngine>,
    detector: Arc<DuplicateDetector>,
    gate: GatePolicy,
    orchestrator: Orchestrator,
    repository: Arc<dyn DefinitionRepository>,
}

impl Engine {
    /// Evaluate a candidate text against the applicable rules
    pub fn validate(
        &self,
        text: &str,
        term: &str,
        categorie: Categorie,
        context: &ContextSet,
    ) -> Result<ValidationResult> {
        self.validation_engine.evaluate(text, term, categorie, context)
    }

    /// Search existing records for exact, fuzzy and synonym duplicates
    pub async fn check_duplicates(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
    ) -> Result<Vec<DuplicateMatch>> {
        self.detector.find(term, context, categorie).await
    }

    /// Run the full generation pipeline for a term.
    ///
    /// `max_iterations` falls back to the configured default when `None`.
    pub async fn orchestrate(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
        max_iterations: Option<u32>,
    ) -> Result<OrchestrationResult> {
        let budget =
            max_iterations.unwrap_or(self.orchestrator.settings().max_iterations);
        self.orchestrator.run(term, context, categorie, budget).await
    }

    /// Decide whether a status transition may proceed
    pub fn decide_gate(
        &self,
        validation: &ValidationResult,
        context: &ContextSet,
        requested: DefinitionStatus,
        current: DefinitionStatus,
    ) -> GateDecision {
        self.gate.decide(validation, context, requested, current)
    }

    /// Rebuild the rule registry snapshot from its source
    pub fn reload_rules(&self) -> Result<LoadReport> {
        self.registry.reload()
    }

    /// The wired repository, for callers that manage records directly
    pub fn repository(&self) -> &Arc<dyn DefinitionRepository> {
        &self.repository
    }
}
