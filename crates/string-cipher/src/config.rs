//! Loading [`CipherOptions`] from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `STRCIPHER_SCHEME` | `v1` |
//! | `STRCIPHER_KEY_DERIVATION` | `sha256` |
//! | `STRCIPHER_ACCEPT_LEGACY` | `false` |

use common::{KeyDerivation, Scheme};
use serde::Deserialize;
use thiserror::Error;

use crate::cipher::CipherOptions;

/// Prefix shared by every `strcipher` environment variable.
pub const ENV_PREFIX: &str = "STRCIPHER";

/// Variables read by [`CipherOptions::from_env`].
pub const OPTION_VARS: [&str; 3] = [
    "STRCIPHER_SCHEME",
    "STRCIPHER_KEY_DERIVATION",
    "STRCIPHER_ACCEPT_LEGACY",
];

/// `STRCIPHER_*` environment source restricted to `names`.
///
/// Other variables under the prefix, the key among them, never enter the
/// configuration map.
pub fn environment<'a>(names: impl IntoIterator<Item = &'a str>) -> config::Environment {
    environment_from(std::env::vars(), names)
}

fn environment_from<'a>(
    vars: impl IntoIterator<Item = (String, String)>,
    names: impl IntoIterator<Item = &'a str>,
) -> config::Environment {
    let names: Vec<&str> = names.into_iter().collect();
    let kept: config::Map<String, String> = vars
        .into_iter()
        .filter(|(k, _)| names.contains(&k.as_str()))
        .collect();
    config::Environment::with_prefix(ENV_PREFIX).source(Some(kept))
}

/// Errors produced while loading options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialised.
    #[error("failed to read cipher configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A value was read but names no known option.
    #[error("invalid cipher configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
struct Settings {
    #[serde(default = "default_scheme")]
    scheme: String,

    #[serde(default = "default_key_derivation")]
    key_derivation: String,

    #[serde(default)]
    accept_legacy: bool,
}

fn default_scheme() -> String {
    "v1".into()
}
fn default_key_derivation() -> String {
    "sha256".into()
}

impl CipherOptions {
    /// Load and validate options from `STRCIPHER_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(environment(OPTION_VARS))
            .build()?;
        Self::from_config(cfg)
    }

    /// Load and validate options from an already built configuration.
    pub fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()
    }
}

impl Settings {
    fn validate(self) -> Result<CipherOptions, ConfigError> {
        let scheme = self
            .scheme
            .parse::<Scheme>()
            .map_err(|e| ConfigError::Invalid(format!("{ENV_PREFIX}_SCHEME: {e}")))?;
        let key_derivation = self
            .key_derivation
            .parse::<KeyDerivation>()
            .map_err(|e| ConfigError::Invalid(format!("{ENV_PREFIX}_KEY_DERIVATION: {e}")))?;
        Ok(CipherOptions {
            scheme,
            key_derivation,
            accept_legacy: self.accept_legacy,
        })
    }
}
