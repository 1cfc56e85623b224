//! Configuration loading and validation.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error if a value is present but invalid, or if the
//! production profile is selected without a key.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Deployment profile. Decides whether an ephemeral or weak key is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentProfile {
    /// Local and test environments. Missing or weak keys only warn.
    #[default]
    Development,
    /// Real data. Missing or weak keys are fatal.
    Production,
}

impl DeploymentProfile {
    /// Stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentProfile::Development => "development",
            DeploymentProfile::Production => "production",
        }
    }
}

/// Validated configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// 64-character hex master key. Absent means ephemeral mode.
    #[serde(default)]
    pub encryption_key: Option<String>,

    /// Deployment profile.
    #[serde(default)]
    pub deployment_profile: DeploymentProfile,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("deployment_profile", &self.deployment_profile)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::default())
    }

    fn load(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The configured key, with blank values treated as absent.
    pub fn encryption_key(&self) -> Option<&str> {
        self.encryption_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    ///
    /// Key format is checked by [`crate::key::resolve_key`]; this only enforces
    /// cross-field rules.
    fn validate(&self) -> Result<()> {
        if self.deployment_profile == DeploymentProfile::Production
            && self.encryption_key().is_none()
        {
            anyhow::bail!("ENCRYPTION_KEY is required when DEPLOYMENT_PROFILE=production");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
