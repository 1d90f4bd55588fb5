//! Generation Orchestration Use Case
//!
//! Coordinates the end-to-end flow per attempt: generate (external), clean
//! (external), validate (pure), check duplicates (once per run), decide the
//! gate, and on rejection loop with feedback guidance until acceptance or
//! the iteration budget runs out. The best-scoring iteration is persisted,
//! not necessarily the last.
//!
//! Concurrency model: attempts for the same (begrip, context, categorie)
//! key serialize on a per-key lock; independent attempts run concurrently
//! up to the worker limit. Cancellation is cooperative and only observed
//! on phase boundaries. Transient external failures are retried with
//! bounded backoff, governed separately from the content-quality iteration
//! budget.

use crate::domain_services::feedback::FeedbackGenerator;
use crate::domain_services::gate::GatePolicy;
use crate::use_cases::duplicate_detector::DuplicateDetector;
use dashmap::DashMap;
use dve_domain::constants::{
    DEFAULT_DUPLICATE_TIMEOUT_SECS, DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_MAX_ITERATIONS,
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_WORKER_LIMIT,
};
use dve_domain::ports::{DefinitionGenerator, DefinitionRepository, TextCleaner};
use dve_domain::{
    Categorie, ContextSet, Definition, DefinitionStatus, Error, FeedbackItem, OrchestrationPhase,
    OrchestrationResult, Result, ValidationResult,
};
use dve_validate::ValidationEngine;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;

/// Orchestrator limits and timeouts
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    /// Default content-quality iteration budget
    pub max_iterations: u32,
    /// Per-call timeout for generation and cleaning
    pub generation_timeout: Duration,
    /// Per-call timeout for duplicate lookups
    pub duplicate_timeout: Duration,
    /// Transient-failure retry attempts per phase
    pub retry_attempts: u32,
    /// Base delay between retries; grows linearly per attempt
    pub retry_delay: Duration,
    /// Concurrent attempts across distinct keys
    pub worker_limit: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            duplicate_timeout: Duration::from_secs(DEFAULT_DUPLICATE_TIMEOUT_SECS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            worker_limit: DEFAULT_WORKER_LIMIT,
        }
    }
}

/// Serialization key: one attempt in flight per key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OrchestrationKey {
    begrip: String,
    context: ContextSet,
    categorie: Categorie,
}

/// End-to-end generation orchestrator
pub struct Orchestrator {
    generator: Arc<dyn DefinitionGenerator>,
    cleaner: Arc<dyn TextCleaner>,
    repository: Arc<dyn DefinitionRepository>,
    engine: Arc<ValidationEngine>,
    detector: Arc<DuplicateDetector>,
    gate: GatePolicy,
    feedback: FeedbackGenerator,
    settings: OrchestratorSettings,
    in_flight: DashMap<OrchestrationKey, Arc<Mutex<()>>>,
    workers: Arc<Semaphore>,
    cancel: CancellationToken,
}

impl Orchestrator {
    /// Wire an orchestrator from its collaborators
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        generator: Arc<dyn DefinitionGenerator>,
        cleaner: Arc<dyn TextCleaner>,
        repository: Arc<dyn DefinitionRepository>,
        engine: Arc<ValidationEngine>,
        detector: Arc<DuplicateDetector>,
        gate: GatePolicy,
        feedback: FeedbackGenerator,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            generator,
            cleaner,
            repository,
            engine,
            detector,
            gate,
            feedback,
            workers: Arc::new(Semaphore::new(settings.worker_limit.max(1))),
            settings,
            in_flight: DashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token; checked between phases only
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The orchestrator's limits
    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Run one orchestration attempt.
    ///
    /// # Arguments
    /// * `term` - The begrip to define
    /// * `context` - Context scoping for the definition
    /// * `categorie` - Ontological kind of the term
    /// * `max_iterations` - Content-quality iteration budget (>= 1)
    ///
    /// # Errors
    /// `Error::Validation` on malformed input, `Error::Generation` when the
    /// external generator keeps failing after retries,
    /// `Error::DuplicateDetection` when the duplicate lookup fails, and
    /// `Error::Cancelled` when the cancellation token fires between phases.
    /// An unaccepted definition is NOT an error: the result reports
    /// `accepted = false` with the best-scoring iteration persisted as a
    /// draft.
    pub async fn run(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
        max_iterations: u32,
    ) -> Result<OrchestrationResult> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::validation("begrip must not be empty"));
        }
        if max_iterations == 0 {
            return Err(Error::validation("max_iterations must be at least 1"));
        }

        let _worker = self
            .workers
            .acquire()
            .await
            .map_err(|_| Error::configuration("orchestrator worker pool closed"))?;
        let key_lock = self.key_lock(term, context, categorie);
        let _in_flight = key_lock.lock().await;

        tracing::info!(term, categorie = %categorie, "orchestration started");
        self.ensure_live(OrchestrationPhase::Started)?;

        // One duplicate check per run, cached across iterations
        let duplicates = self
            .with_retries(
                OrchestrationPhase::DuplicateChecking,
                self.settings.duplicate_timeout,
                || self.detector.find(term, context, categorie),
            )
            .await?;

        let mut history: Vec<f64> = Vec::new();
        let mut guidance: Option<String> = None;
        let mut best: Option<(String, ValidationResult)> = None;
        let mut accepted = false;
        let mut iterations_used = 0;

        for iteration in 1..=max_iterations {
            iterations_used = iteration;

            self.ensure_live(OrchestrationPhase::Generating)?;
            let raw = self
                .with_retries(
                    OrchestrationPhase::Generating,
                    self.settings.generation_timeout,
                    || {
                        self.generator
                            .generate(term, context, categorie, guidance.as_deref())
                    },
                )
                .await?;

            self.ensure_live(OrchestrationPhase::Cleaning)?;
            let cleaned = self
                .with_retries(
                    OrchestrationPhase::Cleaning,
                    self.settings.generation_timeout,
                    || self.cleaner.clean(&raw, term),
                )
                .await?;

            self.ensure_live(OrchestrationPhase::Validating)?;
            let validation = self.engine.evaluate(&cleaned, term, categorie, context)?;
            history.push(validation.overall_score);

            let improved = best
                .as_ref()
                .is_none_or(|(_, prev)| validation.overall_score > prev.overall_score);
            if improved {
                best = Some((cleaned, validation.clone()));
            }

            self.ensure_live(OrchestrationPhase::GateDeciding)?;
            let gate = self.gate.decide(
                &validation,
                context,
                DefinitionStatus::Review,
                DefinitionStatus::Draft,
            );

            if validation.is_acceptable && gate.allowed {
                accepted = true;
                tracing::info!(
                    term,
                    iteration,
                    score = validation.overall_score,
                    "definition accepted"
                );
                break;
            }

            tracing::debug!(
                term,
                iteration,
                score = validation.overall_score,
                violations = validation.violations.len(),
                gate = %gate.reason,
                "iteration rejected"
            );

            if iteration < max_iterations {
                let items = self.feedback.generate(&validation, iteration, &history);
                guidance = Some(FeedbackItem::render_guidance(&items));
            }
        }

        let (text, validation) = best
            .ok_or_else(|| Error::configuration("orchestration completed without iterations"))?;

        let issues = serde_json::to_value(&validation.violations)?;
        let mut definition = Definition::new_draft(term, text, categorie, context.clone())
            .with_validation(validation.overall_score, issues);
        if accepted {
            definition.status = DefinitionStatus::Review;
        }

        let id = self.repository.save(definition.clone()).await?;
        tracing::info!(
            term,
            id = %id,
            accepted,
            iterations_used,
            score = validation.overall_score,
            "orchestration finished"
        );

        Ok(OrchestrationResult {
            definition,
            validation,
            duplicates,
            iterations_used,
            accepted,
        })
    }

    /// Per-key lock enforcing at-most-one-in-flight
    fn key_lock(
        &self,
        term: &str,
        context: &ContextSet,
        categorie: Categorie,
    ) -> Arc<Mutex<()>> {
        let key = OrchestrationKey {
            begrip: term.to_lowercase(),
            context: context.clone(),
            categorie,
        };
        self.in_flight
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn ensure_live(&self, phase: OrchestrationPhase) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(Error::Cancelled { phase })
        } else {
            Ok(())
        }
    }

    /// Run an I/O phase with a timeout and bounded linear backoff.
    ///
    /// A timed-out call is that phase's own failure class and follows the
    /// same retry policy. Non-retryable errors surface immediately; after
    /// the last attempt the error is wrapped in the phase's taxonomy class.
    async fn with_retries<T, Fut>(
        &self,
        phase: OrchestrationPhase,
        timeout: Duration,
        mut op: impl FnMut() -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.settings.retry_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = match tokio::time::timeout(timeout, op()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(Error::Timeout {
                    phase,
                    elapsed_ms: timeout.as_millis() as u64,
                }),
            };
            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt < attempts => {
                    tracing::warn!(
                        phase = %phase,
                        attempt,
                        error = %err,
                        "phase failed, retrying with backoff"
                    );
                    tokio::time::sleep(self.settings.retry_delay * attempt).await;
                }
                Err(err) => return Err(wrap_phase_error(phase, attempt, err)),
            }
        }
    }
}

/// Map an exhausted phase failure into its taxonomy class
fn wrap_phase_error(phase: OrchestrationPhase, attempts: u32, err: Error) -> Error {
    match phase {
        OrchestrationPhase::Generating | OrchestrationPhase::Cleaning => {
            Error::generation_with_source(
                format!("phase {phase} failed after {attempts} attempt(s)"),
                attempts,
                err,
            )
        }
        OrchestrationPhase::DuplicateChecking => Error::duplicate_detection_with_source(
            format!("duplicate lookup failed after {attempts} attempt(s)"),
            err,
        ),
        _ => err,
    }
}
