//! Marker-file discovery on disk

use crate::discovery::DiscoverySource;
use anyhow::{bail, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directories that never contain workspace projects.
pub const EXCLUDED_DIRS: &[&str] = &["vendor", "node_modules"];

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_depth: Option<usize>,
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            respect_gitignore: true,
        }
    }
}

/// Walks a workspace and collects the marker files a source reacts to.
pub struct WorkspaceScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl WorkspaceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ScanConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted, `/`-separated workspace-relative paths of every file whose
    /// name is one of `source`'s marker files.
    pub fn scan(&self, source: &dyn DiscoverySource) -> Result<Vec<String>> {
        self.scan_for(source.marker_files())
    }

    pub fn scan_for(&self, marker_files: &[&str]) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            bail!("Workspace root is not a directory: {}", self.root.display());
        }

        let mut paths = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .max_depth(self.config.max_depth)
            .hidden(true)
            .git_ignore(self.config.respect_gitignore)
            .require_git(false)
            .git_global(false)
            .git_exclude(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .map(|name| EXCLUDED_DIRS.contains(&name))
                        .unwrap_or(false))
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let matches = entry
                .file_name()
                .to_str()
                .map(|name| marker_files.contains(&name))
                .unwrap_or(false);
            if !matches {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            trace!(path = %relative.display(), "Found marker file");
            paths.push(to_workspace_path(relative));
        }

        paths.sort();
        debug!(
            root = %self.root.display(),
            markers = ?marker_files,
            found = paths.len(),
            "Workspace scan complete"
        );
        Ok(paths)
    }
}

fn to_workspace_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
