//! Discovered project nodes and their targets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Library,
    Application,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::Library => write!(f, "library"),
            ProjectType::Application => write!(f, "application"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetHelp {
    pub command: String,
    /// Example flags and what they do.
    pub example_options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMetadata {
    pub technologies: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<TargetHelp>,
}

/// One invocable operation of a project.
///
/// `working_directory` is stamped by [`ProjectNode::insert_target`], so a
/// target always runs in the root of the project that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    pub command: String,
    pub working_directory: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub cacheable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TargetMetadata>,
}

impl TargetSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_directory: String::new(),
            inputs: Vec::new(),
            outputs: None,
            depends_on: Vec::new(),
            cacheable: false,
            metadata: None,
        }
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn depends_on(mut self, target: impl Into<String>) -> Self {
        self.depends_on.push(target.into());
        self
    }

    pub fn cacheable(mut self) -> Self {
        self.cacheable = true;
        self
    }

    pub fn with_metadata(mut self, metadata: TargetMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A discovered project, keyed by its workspace-relative root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub root: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetSpec>,
}

impl ProjectNode {
    pub fn new(root: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            project_type: None,
            source_root: None,
            tags: Vec::new(),
            targets: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    pub fn with_source_root(mut self, source_root: Option<String>) -> Self {
        self.source_root = source_root;
        self
    }

    /// Adds a tag unless it is already present; first insertion decides order.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    pub fn insert_target(&mut self, name: impl Into<String>, mut target: TargetSpec) {
        target.working_directory = self.root.clone();
        self.targets.insert(name.into(), target);
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = (S, TargetSpec)>,
        S: Into<String>,
    {
        for (name, target) in targets {
            self.insert_target(name, target);
        }
        self
    }

    pub fn target(&self, name: &str) -> Option<&TargetSpec> {
        self.targets.get(name)
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Folds another source's view of the same root into this node.
    ///
    /// Fields already set here are kept. Tags are unioned and targets are
    /// only added under names not yet taken.
    pub fn merge(&mut self, other: ProjectNode) {
        if self.project_type.is_none() {
            self.project_type = other.project_type;
        }
        if self.source_root.is_none() {
            self.source_root = other.source_root;
        }
        for tag in other.tags {
            self.add_tag(tag);
        }
        for (name, target) in other.targets {
            if !self.targets.contains_key(&name) {
                self.insert_target(name, target);
            }
        }
    }
}

/// Outcome of discovery for one input path: nothing, or exactly one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<BTreeMap<String, ProjectNode>>,
}

impl DiscoveryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(project: ProjectNode) -> Self {
        let mut projects = BTreeMap::new();
        projects.insert(project.root.clone(), project);
        Self {
            projects: Some(projects),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.as_ref().map_or(true, BTreeMap::is_empty)
    }

    pub fn project(&self, root: &str) -> Option<&ProjectNode> {
        self.projects.as_ref()?.get(root)
    }

    pub fn into_project(self) -> Option<ProjectNode> {
        self.projects?.into_values().next()
    }
}
