//! Configuration types
//!
//! Every tunable the engine recognizes, grouped in typed sections. Values
//! merge from defaults, a TOML file and `DVE_`-prefixed environment
//! variables; ranges are validated at load time so a bad threshold is a
//! startup error, not a silent misbehavior.

mod loader;

pub use loader::ConfigLoader;

use dve_application::{
    DuplicateSettings, FeedbackSettings, GateSettings, OrchestratorSettings,
};
use dve_domain::constants::{
    DEFAULT_CANDIDATE_POOL_LIMIT, DEFAULT_DUPLICATE_TIMEOUT_SECS, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_GENERATION_TIMEOUT_SECS, DEFAULT_HARD_MIN_SCORE, DEFAULT_MAX_ITERATIONS,
    DEFAULT_NEAR_DUPLICATE_THRESHOLD, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_SOFT_MIN_SCORE, DEFAULT_STAGNATION_THRESHOLD, DEFAULT_WORKER_LIMIT,
    MAX_FEEDBACK_ITEMS,
};
use dve_domain::{Error, Result};
use dve_validate::ValidationSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Validation and acceptance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum weighted score for acceptance
    pub hard_min_score: f64,
    /// Borderline threshold, display only
    pub soft_min_score: f64,
    /// Whether a failed verplicht rule blocks acceptance
    pub forbid_critical_issues: bool,
    /// Whether establishment requires at least one context list
    pub min_one_context_required: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            hard_min_score: DEFAULT_HARD_MIN_SCORE,
            soft_min_score: DEFAULT_SOFT_MIN_SCORE,
            forbid_critical_issues: true,
            min_one_context_required: true,
        }
    }
}

/// Duplicate detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateConfig {
    /// Similarity below this value is discarded
    pub fuzzy_threshold: f64,
    /// Similarity at or above this value is a near-duplicate
    pub near_duplicate_threshold: f64,
    /// Upper bound on the fuzzy candidate pool
    pub candidate_pool_limit: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            near_duplicate_threshold: DEFAULT_NEAR_DUPLICATE_THRESHOLD,
            candidate_pool_limit: DEFAULT_CANDIDATE_POOL_LIMIT,
        }
    }
}

/// Orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Default content-quality iteration budget
    pub max_iterations: u32,
    /// Improvement below this value over two iterations is stagnation
    pub stagnation_threshold: f64,
    /// Concurrent attempts across distinct keys
    pub worker_limit: usize,
    /// Per-call generation/cleaning timeout in seconds
    pub generation_timeout_secs: u64,
    /// Per-call duplicate lookup timeout in seconds
    pub duplicate_timeout_secs: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stagnation_threshold: DEFAULT_STAGNATION_THRESHOLD,
            worker_limit: DEFAULT_WORKER_LIMIT,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            duplicate_timeout_secs: DEFAULT_DUPLICATE_TIMEOUT_SECS,
        }
    }
}

/// Transient-failure retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilienceConfig {
    /// Retry attempts per phase
    pub retry_attempts: u32,
    /// Base retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
    /// Optional log file; daily rotation
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Rule source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Directory of YAML rule files; builtin rules when absent
    pub rules_dir: Option<PathBuf>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Validation and acceptance thresholds
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Duplicate detection thresholds
    #[serde(default)]
    pub duplicates: DuplicateConfig,
    /// Orchestration limits and timeouts
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    /// Retry behavior for transient failures
    #[serde(default)]
    pub resilience: ResilienceConfig,
    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Rule source
    #[serde(default)]
    pub rules: RulesConfig,
}

impl AppConfig {
    /// Settings for the validation engine
    pub fn validation_settings(&self) -> ValidationSettings {
        ValidationSettings {
            hard_min_score: self.validation.hard_min_score,
            soft_min_score: self.validation.soft_min_score,
            forbid_critical_issues: self.validation.forbid_critical_issues,
        }
    }

    /// Settings for the gate policy
    pub fn gate_settings(&self) -> GateSettings {
        GateSettings {
            hard_min_score: self.validation.hard_min_score,
            min_one_context_required: self.validation.min_one_context_required,
        }
    }

    /// Settings for the duplicate detector
    pub fn duplicate_settings(&self) -> DuplicateSettings {
        DuplicateSettings {
            fuzzy_threshold: self.duplicates.fuzzy_threshold,
            near_duplicate_threshold: self.duplicates.near_duplicate_threshold,
            candidate_pool_limit: self.duplicates.candidate_pool_limit,
        }
    }

    /// Settings for the feedback generator
    pub fn feedback_settings(&self) -> FeedbackSettings {
        FeedbackSettings {
            stagnation_threshold: self.orchestrator.stagnation_threshold,
            max_items: MAX_FEEDBACK_ITEMS,
        }
    }

    /// Settings for the orchestrator
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            max_iterations: self.orchestrator.max_iterations,
            generation_timeout: Duration::from_secs(self.orchestrator.generation_timeout_secs),
            duplicate_timeout: Duration::from_secs(self.orchestrator.duplicate_timeout_secs),
            retry_attempts: self.resilience.retry_attempts,
            retry_delay: Duration::from_millis(self.resilience.retry_delay_ms),
            worker_limit: self.orchestrator.worker_limit,
        }
    }

    /// Validate value ranges; a bad threshold is a startup error
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.validation.hard_min_score) {
            return Err(Error::configuration("hard_min_score must lie in [0, 1]"));
        }
        if !unit.contains(&self.validation.soft_min_score) {
            return Err(Error::configuration("soft_min_score must lie in [0, 1]"));
        }
        if self.validation.soft_min_score > self.validation.hard_min_score {
            return Err(Error::configuration(
                "soft_min_score must not exceed hard_min_score",
            ));
        }
        if !unit.contains(&self.duplicates.fuzzy_threshold) {
            return Err(Error::configuration("fuzzy_threshold must lie in [0, 1]"));
        }
        if !unit.contains(&self.duplicates.near_duplicate_threshold) {
            return Err(Error::configuration(
                "near_duplicate_threshold must lie in [0, 1]",
            ));
        }
        if self.duplicates.fuzzy_threshold > self.duplicates.near_duplicate_threshold {
            return Err(Error::configuration(
                "fuzzy_threshold must not exceed near_duplicate_threshold",
            ));
        }
        if self.duplicates.candidate_pool_limit == 0 {
            return Err(Error::configuration(
                "candidate_pool_limit must be at least 1",
            ));
        }
        if self.orchestrator.max_iterations == 0 {
            return Err(Error::configuration("max_iterations must be at least 1"));
        }
        if !unit.contains(&self.orchestrator.stagnation_threshold) {
            return Err(Error::configuration(
                "stagnation_threshold must lie in [0, 1]",
            ));
        }
        if self.orchestrator.worker_limit == 0 {
            return Err(Error::configuration("worker_limit must be at least 1"));
        }
        if self.resilience.retry_attempts == 0 {
            return Err(Error::configuration("retry_attempts must be at least 1"));
        }
        crate::logging::parse_log_level(&self.logging.level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = AppConfig::default();
        config.validation.soft_min_score = 0.9;
        config.validation.hard_min_score = 0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("soft_min_score"));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = AppConfig::default();
        config.duplicates.near_duplicate_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut config = AppConfig::default();
        config.orchestrator.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn settings_mappings_carry_values_through() {
        let mut config = AppConfig::default();
        config.validation.hard_min_score = 0.8;
        config.duplicates.fuzzy_threshold = 0.65;
        config.resilience.retry_attempts = 5;

        assert_eq!(config.validation_settings().hard_min_score, 0.8);
        assert_eq!(config.gate_settings().hard_min_score, 0.8);
        assert_eq!(config.duplicate_settings().fuzzy_threshold, 0.65);
        assert_eq!(config.orchestrator_settings().retry_attempts, 5);
    }
}
