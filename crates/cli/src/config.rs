//! Configuration loading and validation for the `strcipher` command.
//!
//! Values are read from `STRCIPHER_*` environment variables; command-line
//! flags override the cipher options afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use string_cipher::config::{environment, OPTION_VARS};
use string_cipher::CipherOptions;

/// Validated command configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tracing log level.
    pub log_level: String,

    /// Cipher options from `STRCIPHER_SCHEME`, `STRCIPHER_KEY_DERIVATION`,
    /// and `STRCIPHER_ACCEPT_LEGACY`.
    pub options: CipherOptions,
}

const LOG_LEVEL_VAR: &str = "STRCIPHER_LOG_LEVEL";

#[derive(Debug, Deserialize)]
struct LogSettings {
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(environment(OPTION_VARS.into_iter().chain([LOG_LEVEL_VAR])))
            .build()
            .context("failed to build strcipher configuration")?;
        Self::from_config(cfg)
    }

    fn from_config(cfg: config::Config) -> Result<Self> {
        let log: LogSettings = cfg
            .clone()
            .try_deserialize()
            .context("failed to deserialise strcipher configuration")?;
        let options = CipherOptions::from_config(cfg)?;

        let c = Config {
            log_level: log.log_level,
            options,
        };
        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("{LOG_LEVEL_VAR} must not be empty");
        }
        Ok(())
    }
}
