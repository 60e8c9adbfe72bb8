//! Dependency edges inferred from manifest requirements
//!
//! Runs after discovery. Every project's `composer.json` is read again and
//! each `require`/`require-dev` key is matched against the known projects.
//! Requirements that match nothing are external packages and are ignored.

use crate::config::EdgeDedup;
use crate::diagnostics::Diagnostics;
use crate::fs::FileSystem;
use crate::manifest::{ManifestParser, MANIFEST_FILE};
use crate::naming::{
    hyphenate_package, hyphenate_path, join_root, normalize_segment, package_segment,
    WORKSPACE_ROOT,
};
use crate::project::ProjectNode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Declared in a manifest.
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    pub kind: DependencyKind,
    /// Workspace-relative manifest that declared the requirement.
    pub origin_file: String,
}

pub struct DependencyInferenceEngine<'a> {
    workspace_root: &'a Path,
    fs: &'a dyn FileSystem,
    diagnostics: &'a dyn Diagnostics,
    dedup: EdgeDedup,
}

impl<'a> DependencyInferenceEngine<'a> {
    pub fn new(
        workspace_root: &'a Path,
        fs: &'a dyn FileSystem,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            workspace_root,
            fs,
            diagnostics,
            dedup: EdgeDedup::default(),
        }
    }

    pub fn with_dedup(mut self, dedup: EdgeDedup) -> Self {
        self.dedup = dedup;
        self
    }

    /// Direct edges for `projects`, keyed by project identifier.
    ///
    /// Edges come out grouped by source in identifier order, production
    /// requirements before development ones, each group in declaration order.
    pub fn infer(&self, projects: &BTreeMap<String, ProjectNode>) -> Vec<DependencyEdge> {
        let parser = ManifestParser::new(self.fs, self.diagnostics);
        let mut edges = Vec::new();
        let mut seen = HashSet::new();

        for (identifier, project) in projects {
            let origin_file = join_root(&project.root, MANIFEST_FILE);
            let manifest_path = if project.root == WORKSPACE_ROOT {
                self.workspace_root.join(MANIFEST_FILE)
            } else {
                self.workspace_root.join(&project.root).join(MANIFEST_FILE)
            };

            let Some(manifest) = parser.parse(&manifest_path) else {
                trace!(project = %identifier, "No manifest, skipping dependency inference");
                continue;
            };

            for requirement in manifest.requirements() {
                let Some(target) = find_project(requirement, projects) else {
                    continue;
                };
                if target == identifier.as_str() {
                    continue;
                }
                if self.dedup == EdgeDedup::Collapse
                    && !seen.insert((identifier.clone(), target.to_string()))
                {
                    continue;
                }

                debug!(source = %identifier, dependency = target, requirement, "Inferred dependency");
                edges.push(DependencyEdge {
                    source: identifier.clone(),
                    target: target.to_string(),
                    kind: DependencyKind::Static,
                    origin_file: origin_file.clone(),
                });
            }
        }

        edges
    }
}

/// Identifier of the workspace project a requirement refers to.
///
/// Each rule is tried against every project before the next rule runs, so a
/// canonical-name match always beats a looser package or root match.
pub fn find_project<'p>(
    requirement: &str,
    projects: &'p BTreeMap<String, ProjectNode>,
) -> Option<&'p str> {
    let hyphenated = hyphenate_package(requirement);

    let by_name = projects
        .iter()
        .find(|(id, node)| **id == hyphenated || node.name == hyphenated);
    if let Some((id, _)) = by_name {
        return Some(id.as_str());
    }

    if let Some(segment) = package_segment(requirement) {
        let normalized = normalize_segment(segment);
        let by_segment = projects.iter().find(|(id, node)| {
            [id.as_str(), node.name.as_str()]
                .iter()
                .any(|candidate| *candidate == segment || *candidate == normalized)
        });
        if let Some((id, _)) = by_segment {
            return Some(id.as_str());
        }
    }

    projects
        .iter()
        .find(|(_, node)| hyphenate_path(&node.root) == hyphenated)
        .map(|(id, _)| id.as_str())
}
