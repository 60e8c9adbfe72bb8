//! Structured logging setup
//!
//! Logs go to stderr so that discovery output on stdout stays machine
//! readable. `RUST_LOG`, when set, replaces the crate-level default filter.
//!
//! # Example
//!
//! ```no_run
//! use phpnx::util::logging::{self, LoggingConfig};
//! use tracing::Level;
//!
//! logging::init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!(workspace = "/repo", "Starting discovery");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_LEVEL_ENV: &str = "PHPNX_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "PHPNX_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `phpnx` targets.
    pub level: Level,
    /// One JSON object per event instead of human-readable lines.
    pub use_json: bool,
    pub include_target: bool,
    /// File and line of the call site.
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from command-line flags, falling back to
    /// `PHPNX_LOG_LEVEL`. An explicit `--log-level` beats `-v` and `-q`.
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level) = log_level {
            parse_level_or_default(level)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            env::var(LOG_LEVEL_ENV)
                .map(|l| parse_level_or_default(&l))
                .unwrap_or(Level::WARN)
        };

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Filter directive applied when `RUST_LOG` is absent.
    pub fn directive(&self) -> String {
        format!("phpnx={}", self.level)
    }
}

/// Case-insensitive level name.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn parse_level_or_default(level: &str) -> Level {
    parse_level(level).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
            level
        );
        Level::WARN
    })
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = match env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(config.directive()),
        };

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
