//! phpnx - project discovery for PHP monorepos
//!
//! Turns the marker files scattered across a workspace (`composer.json`,
//! PHPUnit and PHPStan configs) into typed projects with runnable targets,
//! then infers dependency edges between them from composer requirements.
//!
//! # Example
//!
//! ```no_run
//! use phpnx::{DiscoveryConfig, ProjectGraph, RealFileSystem, TracingDiagnostics};
//! use std::path::Path;
//!
//! let config = DiscoveryConfig::default();
//! let graph = ProjectGraph::build(
//!     Path::new("/path/to/monorepo"),
//!     &config,
//!     &RealFileSystem,
//!     &TracingDiagnostics,
//! )?;
//!
//! for (name, project) in &graph.projects {
//!     println!("{} at {}", name, project.root);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Project Structure
//!
//! - [`discovery`]: discovery sources and the batch engine
//! - [`dependencies`]: requirement-to-project edge inference
//! - [`graph`]: merges sources and runs inference over a workspace

pub mod classify;
pub mod cli;
pub mod config;
pub mod dependencies;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod graph;
pub mod locator;
pub mod manifest;
pub mod naming;
pub mod project;
pub mod scan;
pub mod targets;
pub mod util;

pub use classify::{ClassifierRule, ProjectClassifier};
pub use config::{DiscoveryConfig, EdgeDedup, SourceId};
pub use dependencies::{DependencyEdge, DependencyInferenceEngine, DependencyKind};
pub use diagnostics::{Diagnostics, NoopDiagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use discovery::{DiscoveryContext, DiscoveryEngine, DiscoverySource};
pub use error::{ConfigError, DiscoveryError, ManifestError};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use graph::ProjectGraph;
pub use manifest::{ComposerManifest, ManifestParser};
pub use project::{DiscoveryResult, ProjectNode, ProjectType, TargetSpec};
pub use scan::WorkspaceScanner;
pub use targets::TargetSynthesizer;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
