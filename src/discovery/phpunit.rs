//! PHPUnit source: projects exist where a PHPUnit config sits next to composer.json

use super::{DiscoveryContext, DiscoverySource};
use crate::config::{DiscoveryConfig, SourceId};
use crate::error::DiscoveryError;
use crate::manifest::MANIFEST_FILE;
use crate::naming::hyphenate_path;
use crate::project::ProjectNode;
use crate::targets::{TargetSynthesizer, PHPUNIT_TARGET};

pub struct PhpunitSource {
    targets: TargetSynthesizer,
}

impl PhpunitSource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            targets: TargetSynthesizer::new(config),
        }
    }
}

impl DiscoverySource for PhpunitSource {
    fn id(&self) -> SourceId {
        SourceId::Phpunit
    }

    fn pattern(&self) -> &'static str {
        "**/composer.json"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &[MANIFEST_FILE]
    }

    fn create_project(
        &self,
        _config_path: &str,
        root: &str,
        ctx: &DiscoveryContext<'_>,
    ) -> Result<Option<ProjectNode>, DiscoveryError> {
        let Some(config_file) = ctx.locator().phpunit_config(&ctx.resolve(root)) else {
            return Ok(None);
        };

        let mut project = ProjectNode::new(root, hyphenate_path(root)).with_tags(["phpunit"]);
        project.insert_target(PHPUNIT_TARGET, self.targets.phpunit(config_file));
        Ok(Some(project))
    }
}
