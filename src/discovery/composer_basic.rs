//! Minimal composer.json source
//!
//! Registers projects under their raw package name with no targets. Targets
//! for these projects come from the other sources.

use super::{DiscoveryContext, DiscoverySource};
use crate::classify::{ClassifierRule, ProjectClassifier};
use crate::config::{DiscoveryConfig, SourceId};
use crate::error::DiscoveryError;
use crate::manifest::MANIFEST_FILE;
use crate::naming::{file_name, last_segment};
use crate::project::ProjectNode;

const TAGS: [&str; 2] = ["php", "composer"];

pub struct ComposerBasicSource {
    classifier: ProjectClassifier,
}

impl ComposerBasicSource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            classifier: ProjectClassifier::new(
                config,
                &[ClassifierRule::LibraryMarker, ClassifierRule::ApplicationScripts],
            ),
        }
    }
}

impl DiscoverySource for ComposerBasicSource {
    fn id(&self) -> SourceId {
        SourceId::ComposerBasic
    }

    fn pattern(&self) -> &'static str {
        "{**/composer.json,composer.json}"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &[MANIFEST_FILE]
    }

    fn create_project(
        &self,
        config_path: &str,
        root: &str,
        ctx: &DiscoveryContext<'_>,
    ) -> Result<Option<ProjectNode>, DiscoveryError> {
        if file_name(config_path) != MANIFEST_FILE {
            return Ok(None);
        }
        let Some(manifest) = ctx.manifests().parse(&ctx.resolve(config_path)) else {
            return Ok(None);
        };

        let name = match manifest.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => last_segment(root).to_string(),
        };

        Ok(Some(
            ProjectNode::new(root, name)
                .with_type(self.classifier.classify(&manifest))
                .with_source_root(Some(root.to_string()))
                .with_tags(TAGS),
        ))
    }
}
