use std::path::PathBuf;
use thiserror::Error;

/// Why a manifest could not be turned into a [`crate::manifest::ComposerManifest`].
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure while assembling one project from otherwise valid inputs.
///
/// The discovery and dependency engines catch these per input path; they are
/// never returned from a pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot derive a project root from '{0}'")]
    InvalidConfigPath(String),

    #[error("derivation failed for {path}: {reason}")]
    Derivation { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Unknown discovery source: {0}. Valid options: composer, composer-basic, phpunit, phpstan")]
    UnknownSource(String),

    #[error("Invalid edge dedup policy: {0}. Valid options: keep, collapse")]
    InvalidDedupPolicy(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
