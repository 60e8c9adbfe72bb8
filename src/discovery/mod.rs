//! Project discovery
//!
//! A [`DiscoverySource`] turns one marker-file path into at most one
//! [`ProjectNode`]. The [`DiscoveryEngine`] runs a source over a batch of
//! paths, keeps output aligned with input, suppresses duplicate roots and
//! turns per-path failures into warnings.
//!
//! Sources deliberately keep their own naming, classification and target
//! policies. Workspaces can enable several at once and rely on the targets
//! they contribute being additive.

mod composer;
mod composer_basic;
mod phpstan;
mod phpunit;
mod registry;

pub use composer::ComposerSource;
pub use composer_basic::ComposerBasicSource;
pub use phpstan::PhpstanSource;
pub use phpunit::PhpunitSource;
pub use registry::{source_for, sources_from_config};

use crate::config::SourceId;
use crate::diagnostics::Diagnostics;
use crate::error::DiscoveryError;
use crate::fs::FileSystem;
use crate::locator::ConfigFileLocator;
use crate::manifest::ManifestParser;
use crate::naming::{split_config_path, WORKSPACE_ROOT};
use crate::project::{DiscoveryResult, ProjectNode};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Shared, read-only inputs for one discovery pass.
#[derive(Clone, Copy)]
pub struct DiscoveryContext<'a> {
    pub workspace_root: &'a Path,
    pub fs: &'a dyn FileSystem,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> DiscoveryContext<'a> {
    pub fn new(
        workspace_root: &'a Path,
        fs: &'a dyn FileSystem,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            workspace_root,
            fs,
            diagnostics,
        }
    }

    pub fn manifests(&self) -> ManifestParser<'a> {
        ManifestParser::new(self.fs, self.diagnostics)
    }

    pub fn locator(&self) -> ConfigFileLocator<'a> {
        ConfigFileLocator::new(self.fs)
    }

    /// Absolute location of a workspace-relative path.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        if relative == WORKSPACE_ROOT {
            self.workspace_root.to_path_buf()
        } else {
            self.workspace_root.join(relative)
        }
    }
}

/// One convention for recognising projects.
pub trait DiscoverySource: Send + Sync {
    fn id(&self) -> SourceId;

    /// Glob the host tool uses to hand marker files to this source.
    fn pattern(&self) -> &'static str;

    /// File names that trigger this source.
    fn marker_files(&self) -> &'static [&'static str];

    /// Derives the project rooted at `root` from the marker file at
    /// `config_path`. `Ok(None)` means the directory is not a project for
    /// this source.
    fn create_project(
        &self,
        config_path: &str,
        root: &str,
        ctx: &DiscoveryContext<'_>,
    ) -> Result<Option<ProjectNode>, DiscoveryError>;
}

pub struct DiscoveryEngine<'a> {
    ctx: DiscoveryContext<'a>,
}

impl<'a> DiscoveryEngine<'a> {
    pub fn new(ctx: DiscoveryContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DiscoveryContext<'a> {
        &self.ctx
    }

    /// Runs `source` over `config_paths`.
    ///
    /// Result `i` belongs to input `i`. The first path seen for a root owns
    /// that root; later paths in the same directory get an empty result.
    pub fn discover<S: AsRef<str>>(
        &self,
        source: &dyn DiscoverySource,
        config_paths: &[S],
    ) -> Vec<(String, DiscoveryResult)> {
        let mut seen_roots = HashSet::new();

        config_paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let result = self.discover_one(source, path, &mut seen_roots);
                (path.to_string(), result)
            })
            .collect()
    }

    fn discover_one(
        &self,
        source: &dyn DiscoverySource,
        config_path: &str,
        seen_roots: &mut HashSet<String>,
    ) -> DiscoveryResult {
        let relative = self.relativize(config_path);
        let (root, file) = split_config_path(&relative);

        if !seen_roots.insert(root.to_string()) {
            trace!(source = %source.id(), path = config_path, root, "Root already discovered");
            return DiscoveryResult::empty();
        }

        let outcome = if file.is_empty() {
            Err(DiscoveryError::InvalidConfigPath(config_path.to_string()))
        } else {
            source.create_project(&relative, root, &self.ctx)
        };

        match outcome {
            Ok(Some(project)) => {
                debug!(
                    source = %source.id(),
                    root = %project.root,
                    name = %project.name,
                    targets = project.targets.len(),
                    "Discovered project"
                );
                DiscoveryResult::single(project)
            }
            Ok(None) => DiscoveryResult::empty(),
            Err(e) => {
                self.ctx.diagnostics.warn(&format!(
                    "Failed to create project configuration for {}: {}",
                    config_path, e
                ));
                DiscoveryResult::empty()
            }
        }
    }

    /// Absolute inputs under the workspace are rewritten relative to it.
    fn relativize(&self, config_path: &str) -> String {
        let path = Path::new(config_path);
        if path.is_absolute() {
            if let Ok(stripped) = path.strip_prefix(self.ctx.workspace_root) {
                return stripped.to_string_lossy().into_owned();
            }
        }
        config_path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::fs::MockFileSystem;
    use crate::project::ProjectNode;

    /// Accepts every path, fails for roots named `broken`.
    struct EchoSource;

    impl DiscoverySource for EchoSource {
        fn id(&self) -> SourceId {
            SourceId::Composer
        }

        fn pattern(&self) -> &'static str {
            "**/marker"
        }

        fn marker_files(&self) -> &'static [&'static str] {
            &["marker"]
        }

        fn create_project(
            &self,
            config_path: &str,
            root: &str,
            _ctx: &DiscoveryContext<'_>,
        ) -> Result<Option<ProjectNode>, DiscoveryError> {
            match root {
                "broken" => Err(DiscoveryError::Derivation {
                    path: config_path.to_string(),
                    reason: "boom".to_string(),
                }),
                "skip" => Ok(None),
                _ => Ok(Some(ProjectNode::new(root, format!("echo:{}", config_path)))),
            }
        }
    }

    fn run(paths: &[&str]) -> (Vec<(String, DiscoveryResult)>, Vec<String>) {
        let fs = MockFileSystem::with_root("/workspace");
        let sink = RecordingDiagnostics::new();
        let ctx = DiscoveryContext::new(Path::new("/workspace"), &fs, &sink);
        let results = DiscoveryEngine::new(ctx).discover(&EchoSource, paths);
        (results, sink.messages())
    }

    #[test]
    fn test_output_aligned_with_input() {
        let (results, _) = run(&["b/marker", "a/marker", "skip/marker"]);

        let keys: Vec<&str> = results.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(keys, vec!["b/marker", "a/marker", "skip/marker"]);
        assert!(results[0].1.project("b").is_some());
        assert!(results[1].1.project("a").is_some());
        assert!(results[2].1.is_empty());
    }

    #[test]
    fn test_duplicate_root_goes_to_first_path() {
        let (results, _) = run(&["lib/marker", "other/marker", "lib/marker.dist"]);

        assert_eq!(
            results[0].1.project("lib").unwrap().name,
            "echo:lib/marker"
        );
        assert!(results[2].1.is_empty());
    }

    #[test]
    fn test_failure_is_isolated_and_reported() {
        let (results, warnings) = run(&["broken/marker", "fine/marker"]);

        assert!(results[0].1.is_empty());
        assert!(results[1].1.project("fine").is_some());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("broken/marker"));
        assert!(warnings[0].contains("boom"));
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let (results, warnings) = run(&["lib/"]);

        assert!(results[0].1.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_absolute_paths_are_relativized() {
        let (results, _) = run(&["/workspace/packages/a/marker"]);

        assert_eq!(results[0].0, "/workspace/packages/a/marker");
        assert!(results[0].1.project("packages/a").is_some());
    }

    #[test]
    fn test_top_level_marker_has_workspace_root() {
        let (results, _) = run(&["marker"]);
        assert!(results[0].1.project(".").is_some());
    }
}
