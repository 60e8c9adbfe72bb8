//! Prioritized config-file lookup

use crate::fs::FileSystem;
use std::path::Path;

/// PHPUnit configuration names, highest priority first.
pub const PHPUNIT_CONFIG_FILES: &[&str] = &[
    "phpunit.xml",
    "phpunit.xml.dist",
    "phpunit.dist.xml",
    ".phpunit.xml",
    ".phpunit.xml.dist",
    "phpunit.config.xml",
];

/// PHPStan configuration names, highest priority first.
pub const PHPSTAN_CONFIG_FILES: &[&str] = &[
    "phpstan.neon",
    "phpstan.neon.dist",
    "phpstan.json",
    "phpstan.json.dist",
    "phpstan.php",
    "phpstan.php.dist",
];

/// Finds the first candidate filename present in a directory.
pub struct ConfigFileLocator<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ConfigFileLocator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Returns the earliest entry of `candidates` that exists as a file in
    /// `directory`. A missing directory simply yields `None`.
    pub fn locate(&self, directory: &Path, candidates: &[&'static str]) -> Option<&'static str> {
        candidates
            .iter()
            .copied()
            .find(|name| self.fs.is_file(&directory.join(name)))
    }

    pub fn phpunit_config(&self, directory: &Path) -> Option<&'static str> {
        self.locate(directory, PHPUNIT_CONFIG_FILES)
    }

    pub fn phpstan_config(&self, directory: &Path) -> Option<&'static str> {
        self.locate(directory, PHPSTAN_CONFIG_FILES)
    }
}
