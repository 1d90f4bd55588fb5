//! Configuration loader
//!
//! Merges configuration from defaults, a TOML file and environment
//! variables using Figment. Later sources override earlier ones.

use crate::config::AppConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use dve_domain::Result;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load configuration from all sources.
    ///
    /// Merge order (later overrides earlier):
    /// 1. Defaults from `AppConfig::default()`
    /// 2. TOML file (explicit path, or the first default location found)
    /// 3. Environment variables, e.g. `DVE_VALIDATION__HARD_MIN_SCORE`
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) => {
                if config_path.exists() {
                    figment = figment.merge(Toml::file(config_path));
                    tracing::info!(path = %config_path.display(), "configuration file loaded");
                } else {
                    tracing::warn!(path = %config_path.display(), "configuration file not found");
                }
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    tracing::info!(path = %default_path.display(), "configuration file loaded");
                }
            }
        }

        let prefix = self
            .env_prefix
            .clone()
            .unwrap_or_else(|| CONFIG_ENV_PREFIX.to_string());
        // Double underscore separates nesting levels so field names may
        // contain single underscores
        figment = figment.merge(Env::prefixed(&format!("{prefix}_")).split("__"));

        let app_config: AppConfig = figment
            .extract()
            .context("failed to extract configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reload configuration from the same sources
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// The configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file location
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load_without_any_source() {
        let config = ConfigLoader::new()
            .with_config_path("/nonexistent/dve.toml")
            .load()
            .unwrap();
        assert_eq!(
            config.validation.hard_min_score,
            dve_domain::constants::DEFAULT_HARD_MIN_SCORE
        );
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dve.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[validation]\nhard_min_score = 0.85\n\n[orchestrator]\nmax_iterations = 5"
        )
        .unwrap();

        let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
        assert_eq!(config.validation.hard_min_score, 0.85);
        assert_eq!(config.orchestrator.max_iterations, 5);
        // Untouched sections keep their defaults
        assert_eq!(
            config.duplicates.near_duplicate_threshold,
            dve_domain::constants::DEFAULT_NEAR_DUPLICATE_THRESHOLD
        );
    }

    #[test]
    fn invalid_values_fail_at_load_time() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dve.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[validation]\nhard_min_score = 7.0").unwrap();

        let err = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .unwrap_err();
        assert!(matches!(err, dve_domain::Error::Configuration { .. }));
    }

    #[test]
    fn environment_overrides_use_double_underscore_nesting() {
        unsafe {
            env::set_var("DVETEST_VALIDATION__HARD_MIN_SCORE", "0.9");
        }
        let config = ConfigLoader::new()
            .with_config_path("/nonexistent/dve.toml")
            .with_env_prefix("DVETEST")
            .load()
            .unwrap();
        unsafe {
            env::remove_var("DVETEST_VALIDATION__HARD_MIN_SCORE");
        }
        assert_eq!(config.validation.hard_min_score, 0.9);
    }
}
