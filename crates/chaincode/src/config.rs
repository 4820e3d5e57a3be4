//! Configuration loading and validation for the chaincode host.
//!
//! All values are read from `CHAINCODE_`-prefixed environment variables at
//! startup. Every field has a default, so an empty environment is valid.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dispatch::settings::{DispatchSettings, DEFAULT_ENCRYPTION_FLAG, DEFAULT_INVOKE_FUNCTION};

/// Environment variable prefix, e.g. `CHAINCODE_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "CHAINCODE";

/// Validated chaincode configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Function name the host must call for transactions.
    #[serde(default = "default_invoke_function")]
    pub invoke_function: String,

    /// Fourth `put` argument that enables the encrypt/decrypt load step.
    #[serde(default = "default_encryption_flag")]
    pub encryption_flag: String,

    /// Name reported in startup logs.
    #[serde(default = "default_chaincode_name")]
    pub chaincode_name: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_invoke_function() -> String {
    DEFAULT_INVOKE_FUNCTION.into()
}
fn default_encryption_flag() -> String {
    DEFAULT_ENCRYPTION_FLAG.into()
}
fn default_chaincode_name() -> String {
    "newkeyperinvoke".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            invoke_function: default_invoke_function(),
            encryption_flag: default_encryption_flag(),
            chaincode_name: default_chaincode_name(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Settings handed to the dispatcher.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings::new(self.invoke_function.as_str(), self.encryption_flag.as_str())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.invoke_function, "CHAINCODE_INVOKE_FUNCTION")?;
        ensure_non_empty(&self.encryption_flag, "CHAINCODE_ENCRYPTION_FLAG")?;
        ensure_non_empty(&self.chaincode_name, "CHAINCODE_CHAINCODE_NAME")?;
        ensure_non_empty(&self.log_level, "CHAINCODE_LOG_LEVEL")?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let cfg = Config::default();
        assert_eq!(cfg.invoke_function, "invoke");
        assert_eq!(cfg.encryption_flag, "enable");
        assert_eq!(cfg.chaincode_name, "newkeyperinvoke");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_flag() {
        let cfg = Config {
            encryption_flag: "  ".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_invoke_function() {
        let cfg = Config {
            invoke_function: "".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn dispatch_settings_projection() {
        let cfg = Config {
            invoke_function: "run".into(),
            encryption_flag: "crypto".into(),
            ..Config::default()
        };
        assert_eq!(cfg.dispatch_settings(), DispatchSettings::new("run", "crypto"));
    }

    #[test]
    fn deserialises_with_defaults() {
        let cfg: Config = config::Config::builder()
            .set_override("log_level", "debug")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.invoke_function, "invoke");
    }
}
