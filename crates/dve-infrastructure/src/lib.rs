//! Infrastructure layer
//!
//! Configuration loading (defaults, TOML file, environment variables) and
//! structured logging initialization. All tunables recognized by the engine
//! live in [`config::AppConfig`]; the typed sections map into the settings
//! structs the core components consume.

/// Infrastructure constants
pub mod constants;
/// Error context extension
pub mod error_ext;
/// Structured logging with tracing
pub mod logging;

/// Configuration types and loading
pub mod config;

pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
