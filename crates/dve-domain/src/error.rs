//! Error handling types
//!
//! The taxonomy distinguishes startup-blocking configuration problems,
//! retryable external failures, immediate input rejections and propagating
//! detection failures. A denied gate decision is NOT an error: it is a
//! structured negative [`crate::GateDecision`] returned on the Ok path.

use crate::value_objects::OrchestrationPhase;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Definitie Validatie Engine
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or empty rule set, invalid thresholds - fatal, startup-blocking
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// External generation or cleaning failure - retryable, then fatal per attempt
    #[error("Generation error after {attempts} attempt(s): {message}")]
    Generation {
        /// Description of the generation failure
        message: String,
        /// Number of attempts made before giving up
        attempts: u32,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed input to the engine - rejected immediately, never retried
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid input
        message: String,
    },

    /// Storage or search failure during duplicate detection.
    /// Must propagate; the engine never assumes uniqueness on error.
    #[error("Duplicate detection error: {message}")]
    DuplicateDetection {
        /// Description of the detection failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Durable storage operation failure
    #[error("Repository error: {message}")]
    Repository {
        /// Description of the storage failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A phase exceeded its configured time budget.
    /// Treated as that phase's own failure class for retry purposes.
    #[error("Timeout in phase {phase} after {elapsed_ms}ms")]
    Timeout {
        /// The orchestration phase that timed out
        phase: OrchestrationPhase,
        /// Elapsed time before the deadline fired
        elapsed_ms: u64,
    },

    /// Cooperative cancellation observed between phases
    #[error("Cancelled before phase {phase}")]
    Cancelled {
        /// The phase that would have run next
        phase: OrchestrationPhase,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization error (violation snapshots)
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

// Basic error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error for malformed engine input
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Generation error creation methods
impl Error {
    /// Create a generation error
    pub fn generation<S: Into<String>>(message: S, attempts: u32) -> Self {
        Self::Generation {
            message: message.into(),
            attempts,
            source: None,
        }
    }

    /// Create a generation error with source
    pub fn generation_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        attempts: u32,
        source: E,
    ) -> Self {
        Self::Generation {
            message: message.into(),
            attempts,
            source: Some(Box::new(source)),
        }
    }
}

// Detection and storage error creation methods
impl Error {
    /// Create a duplicate detection error
    pub fn duplicate_detection<S: Into<String>>(message: S) -> Self {
        Self::DuplicateDetection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a duplicate detection error with source
    pub fn duplicate_detection_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::DuplicateDetection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a repository error
    pub fn repository<S: Into<String>>(message: S) -> Self {
        Self::Repository {
            message: message.into(),
            source: None,
        }
    }

    /// Create a repository error with source
    pub fn repository_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Repository {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether the orchestrator may retry the failed phase with backoff.
    ///
    /// Only phase-local I/O failures and timeouts qualify. Configuration and
    /// input validation errors are definitive; cancellation is final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Generation { .. }
                | Self::Repository { .. }
                | Self::DuplicateDetection { .. }
                | Self::Timeout { .. }
                | Self::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(Error::generation("provider unavailable", 1).is_retryable());
        assert!(Error::repository("connection reset").is_retryable());
        assert!(Error::duplicate_detection("index offline").is_retryable());
        assert!(!Error::configuration("empty rule set").is_retryable());
        assert!(!Error::validation("missing term").is_retryable());
        assert!(
            !Error::Cancelled {
                phase: OrchestrationPhase::Generating
            }
            .is_retryable()
        );
    }

    #[test]
    fn timeout_is_retryable_and_names_phase() {
        let err = Error::Timeout {
            phase: OrchestrationPhase::DuplicateChecking,
            elapsed_ms: 10_000,
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("duplicate_checking"));
    }
}
