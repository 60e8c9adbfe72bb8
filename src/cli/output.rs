//! Rendering of the project graph for the terminal

use crate::graph::ProjectGraph;
use anyhow::{Context, Result};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    /// Human-readable summary.
    Text,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, graph: &ProjectGraph) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(graph).context("Failed to serialize project graph to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(graph).context("Failed to serialize project graph to YAML")
            }
            OutputFormat::Text => Ok(self.format_text(graph)),
        }
    }

    fn format_text(&self, graph: &ProjectGraph) -> String {
        let mut out = String::new();

        if graph.projects.is_empty() {
            out.push_str("No projects found\n");
            return out;
        }

        let _ = writeln!(out, "Projects ({})", graph.projects.len());
        for (name, project) in &graph.projects {
            let project_type = project
                .project_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(out, "  {} [{}] {}", name, project_type, project.root);

            if let Some(source_root) = &project.source_root {
                let _ = writeln!(out, "    source: {}", source_root);
            }
            if !project.tags.is_empty() {
                let _ = writeln!(out, "    tags: {}", project.tags.join(", "));
            }
            for (target_name, target) in &project.targets {
                let _ = writeln!(out, "    {}: {}", target_name, target.command);
            }
        }

        if !graph.dependencies.is_empty() {
            let _ = writeln!(out, "\nDependencies ({})", graph.dependencies.len());
            for edge in &graph.dependencies {
                let _ = writeln!(
                    out,
                    "  {} -> {} ({})",
                    edge.source, edge.target, edge.origin_file
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::{DependencyEdge, DependencyKind};
    use crate::project::{ProjectNode, ProjectType, TargetSpec};

    fn graph() -> ProjectGraph {
        let mut graph = ProjectGraph::default();
        graph.projects.insert(
            "acme-api".to_string(),
            ProjectNode::new("apps/api", "acme-api")
                .with_type(ProjectType::Application)
                .with_tags(["composer:project"])
                .with_targets([("install", TargetSpec::new("composer install"))]),
        );
        graph.projects.insert(
            "acme-core".to_string(),
            ProjectNode::new("packages/core", "acme-core"),
        );
        graph.dependencies.push(DependencyEdge {
            source: "acme-api".to_string(),
            target: "acme-core".to_string(),
            kind: DependencyKind::Static,
            origin_file: "apps/api/composer.json".to_string(),
        });
        graph
    }

    #[test]
    fn test_json_output() {
        let output = OutputFormatter::new(OutputFormat::Json).format(&graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["projects"]["acme-api"]["projectType"], "application");
        assert_eq!(value["dependencies"][0]["target"], "acme-core");
    }

    #[test]
    fn test_yaml_output() {
        let output = OutputFormatter::new(OutputFormat::Yaml).format(&graph()).unwrap();
        assert!(output.contains("originFile: apps/api/composer.json"));
    }

    #[test]
    fn test_text_output() {
        let output = OutputFormatter::new(OutputFormat::Text).format(&graph()).unwrap();
        assert!(output.contains("Projects (2)"));
        assert!(output.contains("  acme-api [application] apps/api"));
        assert!(output.contains("    install: composer install"));
        assert!(output.contains("  acme-core [-] packages/core"));
        assert!(output.contains("  acme-api -> acme-core (apps/api/composer.json)"));
    }

    #[test]
    fn test_text_output_empty() {
        let output = OutputFormatter::new(OutputFormat::Text)
            .format(&ProjectGraph::default())
            .unwrap();
        assert_eq!(output, "No projects found\n");
    }
}
