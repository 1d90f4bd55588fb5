//! Domain constants
//!
//! Default thresholds and limits shared across the engine. Configuration may
//! override the tunable values; the schema tag and structural limits are
//! fixed.

/// Schema tag stamped on every [`crate::ValidationResult`]
pub const VALIDATION_SCHEMA_VERSION: &str = "1.0";

/// Minimum weighted score required before a definition may be accepted
pub const DEFAULT_HARD_MIN_SCORE: f64 = 0.7;

/// Borderline threshold reported for UI display; never blocks acceptance
pub const DEFAULT_SOFT_MIN_SCORE: f64 = 0.5;

/// Fuzzy similarity below this value is discarded by duplicate detection
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// Fuzzy similarity at or above this value is treated as a near-duplicate
pub const DEFAULT_NEAR_DUPLICATE_THRESHOLD: f64 = 0.9;

/// Upper bound on the fuzzy candidate pool per duplicate query
pub const DEFAULT_CANDIDATE_POOL_LIMIT: usize = 100;

/// Default content-quality iteration budget per orchestration run
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Score improvement below this value over two iterations counts as stagnation
pub const DEFAULT_STAGNATION_THRESHOLD: f64 = 0.05;

/// Feedback items are truncated to this many entries
pub const MAX_FEEDBACK_ITEMS: usize = 5;

/// Default concurrent orchestration attempts across distinct keys
pub const DEFAULT_WORKER_LIMIT: usize = 4;

/// Default per-phase timeout for external generation calls
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Default per-phase timeout for duplicate-detection storage lookups
pub const DEFAULT_DUPLICATE_TIMEOUT_SECS: u64 = 10;

/// Default transient-failure retry attempts per phase
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default base delay between transient-failure retries
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
