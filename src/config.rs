use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_LIBRARY_MARKER: &str = "library";
const DEFAULT_APPLICATION_MARKER: &str = "project";
const DEFAULT_APPLICATION_SCRIPTS: &[&str] = &["serve", "start", "dev", "watch"];
const DEFAULT_TEST_RUNNER_PACKAGE: &str = "phpunit/phpunit";

/// Discovery sources that can be enabled for a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceId {
    Composer,
    ComposerBasic,
    Phpunit,
    Phpstan,
}

impl SourceId {
    pub const ALL: [SourceId; 4] = [
        SourceId::Composer,
        SourceId::ComposerBasic,
        SourceId::Phpunit,
        SourceId::Phpstan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Composer => "composer",
            SourceId::ComposerBasic => "composer-basic",
            SourceId::Phpunit => "phpunit",
            SourceId::Phpstan => "phpstan",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownSource(s.to_string()))
    }
}

/// What to do when `require` and `require-dev` both point at the same project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDedup {
    /// Emit one edge per declaration.
    #[default]
    Keep,
    /// Emit one edge per (source, target) pair.
    Collapse,
}

impl FromStr for EdgeDedup {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(EdgeDedup::Keep),
            "collapse" => Ok(EdgeDedup::Collapse),
            _ => Err(ConfigError::InvalidDedupPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// `type` value that forces a library.
    pub library_marker: String,
    /// `type` value that forces an application.
    pub application_marker: String,
    /// Script names that mark a long-running application.
    pub application_scripts: Vec<String>,
    /// Dev requirement that implies a test target.
    pub test_runner_package: String,
    pub edge_dedup: EdgeDedup,
    pub sources: Vec<SourceId>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            library_marker: DEFAULT_LIBRARY_MARKER.to_string(),
            application_marker: DEFAULT_APPLICATION_MARKER.to_string(),
            application_scripts: DEFAULT_APPLICATION_SCRIPTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            test_runner_package: DEFAULT_TEST_RUNNER_PACKAGE.to_string(),
            edge_dedup: EdgeDedup::Keep,
            sources: SourceId::ALL.to_vec(),
        }
    }
}

impl DiscoveryConfig {
    /// Defaults overlaid with `PHPNX_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(marker) = env::var("PHPNX_LIBRARY_MARKER") {
            config.library_marker = marker;
        }
        if let Ok(marker) = env::var("PHPNX_APPLICATION_MARKER") {
            config.application_marker = marker;
        }
        if let Ok(scripts) = env::var("PHPNX_APPLICATION_SCRIPTS") {
            config.application_scripts = split_list(&scripts);
        }
        if let Ok(package) = env::var("PHPNX_TEST_RUNNER_PACKAGE") {
            config.test_runner_package = package;
        }
        if let Ok(policy) = env::var("PHPNX_EDGE_DEDUP") {
            config.edge_dedup = policy.parse()?;
        }
        if let Ok(sources) = env::var("PHPNX_SOURCES") {
            config.sources = split_list(&sources)
                .iter()
                .map(|s| s.parse::<SourceId>())
                .collect::<Result<_, _>>()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML or JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let config: Self = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_marker.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "library marker must not be empty".to_string(),
            ));
        }
        if self.application_marker.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "application marker must not be empty".to_string(),
            ));
        }
        if self.library_marker == self.application_marker {
            return Err(ConfigError::ValidationFailed(format!(
                "library and application markers must differ (both are '{}')",
                self.library_marker
            )));
        }
        if self.test_runner_package.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "test runner package must not be empty".to_string(),
            ));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one discovery source must be enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_enabled(&self, source: SourceId) -> bool {
        self.sources.contains(&source)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
