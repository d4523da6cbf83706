//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DP_SCRIPT_SPEC` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use dp_script_spec::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to install tracing");
//!
//! let policy = config.validation.to_policy();
//! ```

mod error;
mod logging;
mod validation;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use validation::ValidationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Plan validation thresholds and switches
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DP_SCRIPT_SPEC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DP_SCRIPT_SPEC__VALIDATION__EPSILON_WARNING_THRESHOLD=3.0`
    ///   -> `validation.epsilon_warning_threshold = 3.0`
    /// - `DP_SCRIPT_SPEC__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DP_SCRIPT_SPEC")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BudgetPolicy, ValidationPolicy};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const KEYS: &[&str] = &[
        "DP_SCRIPT_SPEC__VALIDATION__EPSILON_WARNING_THRESHOLD",
        "DP_SCRIPT_SPEC__VALIDATION__MAX_DELTA",
        "DP_SCRIPT_SPEC__VALIDATION__DELTA_WARNING_THRESHOLD",
        "DP_SCRIPT_SPEC__VALIDATION__BUDGET_POLICY",
        "DP_SCRIPT_SPEC__VALIDATION__REQUIRE_UNIQUE_VARIABLE_NAMES",
        "DP_SCRIPT_SPEC__LOGGING__LEVEL",
        "DP_SCRIPT_SPEC__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.validation.to_policy(), ValidationPolicy::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_validation_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DP_SCRIPT_SPEC__VALIDATION__EPSILON_WARNING_THRESHOLD", "3.0");
        env::set_var("DP_SCRIPT_SPEC__VALIDATION__BUDGET_POLICY", "unenforced");
        env::set_var("DP_SCRIPT_SPEC__VALIDATION__REQUIRE_UNIQUE_VARIABLE_NAMES", "false");
        let result = AppConfig::load();
        clear_env();

        let policy = result.unwrap().validation.to_policy();
        assert_eq!(policy.epsilon_warning_threshold, 3.0);
        assert_eq!(policy.budget_policy, BudgetPolicy::Unenforced);
        assert!(!policy.require_unique_variable_names);
    }

    #[test]
    fn test_load_logging_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DP_SCRIPT_SPEC__LOGGING__FORMAT", "json");
        env::set_var("DP_SCRIPT_SPEC__LOGGING__LEVEL", "warn");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DP_SCRIPT_SPEC__VALIDATION__DELTA_WARNING_THRESHOLD", "0.001");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DeltaWarningAboveMax { .. })
        ));
    }

    #[test]
    fn test_unparsable_number_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DP_SCRIPT_SPEC__VALIDATION__MAX_DELTA", "tiny");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
