//! Workspace project graph
//!
//! Runs every enabled source, folds their nodes together by root and then
//! infers dependency edges between the resulting projects.

use crate::config::{DiscoveryConfig, SourceId};
use crate::dependencies::{DependencyEdge, DependencyInferenceEngine};
use crate::diagnostics::Diagnostics;
use crate::discovery::{source_for, sources_from_config, DiscoveryContext, DiscoveryEngine};
use crate::fs::FileSystem;
use crate::project::ProjectNode;
use crate::scan::WorkspaceScanner;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGraph {
    /// Projects keyed by name.
    pub projects: BTreeMap<String, ProjectNode>,
    pub dependencies: Vec<DependencyEdge>,
}

impl ProjectGraph {
    /// Scans `workspace_root` on disk for each enabled source's marker files
    /// and builds the graph from what it finds.
    pub fn build(
        workspace_root: &Path,
        config: &DiscoveryConfig,
        fs: &dyn FileSystem,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let scanner = WorkspaceScanner::new(workspace_root);
        let mut markers = Vec::new();
        for source in sources_from_config(config) {
            let paths = scanner
                .scan(source.as_ref())
                .with_context(|| format!("Failed to scan for {} markers", source.id()))?;
            markers.push((source.id(), paths));
        }

        let ctx = DiscoveryContext::new(workspace_root, fs, diagnostics);
        Ok(Self::from_markers(ctx, config, &markers))
    }

    /// Builds the graph from already-located marker paths, one batch per
    /// source. Batches are applied in order, so earlier sources win naming.
    pub fn from_markers(
        ctx: DiscoveryContext<'_>,
        config: &DiscoveryConfig,
        markers: &[(SourceId, Vec<String>)],
    ) -> Self {
        let engine = DiscoveryEngine::new(ctx);
        let mut by_root: BTreeMap<String, ProjectNode> = BTreeMap::new();

        for (id, paths) in markers {
            let source = source_for(*id, config);
            let results = engine.discover(source.as_ref(), paths.as_slice());
            debug!(source = %id, paths = paths.len(), "Source finished");

            for project in results.into_iter().filter_map(|(_, r)| r.into_project()) {
                match by_root.get_mut(&project.root) {
                    Some(existing) => existing.merge(project),
                    None => {
                        by_root.insert(project.root.clone(), project);
                    }
                }
            }
        }

        let mut projects: BTreeMap<String, ProjectNode> = BTreeMap::new();
        for (root, project) in by_root {
            if let Some(existing) = projects.get(&project.name) {
                ctx.diagnostics.warn(&format!(
                    "Project name '{}' at {} is already used by {}, skipping",
                    project.name, root, existing.root
                ));
                continue;
            }
            projects.insert(project.name.clone(), project);
        }

        let dependencies = DependencyInferenceEngine::new(ctx.workspace_root, ctx.fs, ctx.diagnostics)
            .with_dedup(config.edge_dedup)
            .infer(&projects);

        info!(
            projects = projects.len(),
            dependencies = dependencies.len(),
            "Project graph built"
        );

        Self {
            projects,
            dependencies,
        }
    }

    pub fn project(&self, name: &str) -> Option<&ProjectNode> {
        self.projects.get(name)
    }

    /// Edges leaving `name`.
    pub fn dependencies_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.dependencies.iter().filter(move |e| e.source == name)
    }
}
