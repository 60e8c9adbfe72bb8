use super::commands::DiscoverArgs;
use super::output::OutputFormatter;
use crate::config::{DiscoveryConfig, EdgeDedup, SourceId};
use crate::diagnostics::TracingDiagnostics;
use crate::fs::RealFileSystem;
use crate::graph::ProjectGraph;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, error};

/// Config file first, otherwise `PHPNX_*` variables, then command-line
/// overrides on top.
pub fn resolve_config(args: &DiscoverArgs) -> Result<DiscoveryConfig> {
    let mut config = match &args.config {
        Some(path) => DiscoveryConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DiscoveryConfig::from_env().context("Invalid PHPNX_* environment configuration")?,
    };

    if !args.sources.is_empty() {
        config.sources = args
            .sources
            .iter()
            .map(|s| s.parse::<SourceId>())
            .collect::<Result<_, _>>()?;
    }
    if args.dedup_edges {
        config.edge_dedup = EdgeDedup::Collapse;
    }

    config.validate()?;
    Ok(config)
}

pub fn run_discover(args: &DiscoverArgs) -> Result<String> {
    let workspace = match &args.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let workspace: PathBuf = workspace
        .canonicalize()
        .with_context(|| format!("Workspace not found: {}", workspace.display()))?;

    let config = resolve_config(args)?;
    debug!(workspace = %workspace.display(), ?config, "Starting discovery");

    let graph = ProjectGraph::build(&workspace, &config, &RealFileSystem, &TracingDiagnostics)?;
    OutputFormatter::new(args.format.into()).format(&graph)
}

/// Prints the graph to stdout. Returns the process exit code.
pub fn handle_discover(args: &DiscoverArgs) -> i32 {
    match run_discover(args) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
