//! PHPStan source: one project per directory holding an analyzer config

use super::{DiscoveryContext, DiscoverySource};
use crate::config::{DiscoveryConfig, SourceId};
use crate::error::DiscoveryError;
use crate::locator::PHPSTAN_CONFIG_FILES;
use crate::naming::hyphenate_path;
use crate::project::{ProjectNode, ProjectType};
use crate::targets::{TargetSynthesizer, PHPSTAN_TARGET};

pub struct PhpstanSource {
    targets: TargetSynthesizer,
}

impl PhpstanSource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            targets: TargetSynthesizer::new(config),
        }
    }
}

impl DiscoverySource for PhpstanSource {
    fn id(&self) -> SourceId {
        SourceId::Phpstan
    }

    fn pattern(&self) -> &'static str {
        "**/{phpstan.neon,phpstan.neon.dist,phpstan.json,phpstan.json.dist,phpstan.php,phpstan.php.dist}"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        PHPSTAN_CONFIG_FILES
    }

    /// The analyzed config is whichever variant ranks highest in the
    /// directory, not necessarily the one that triggered discovery.
    fn create_project(
        &self,
        _config_path: &str,
        root: &str,
        ctx: &DiscoveryContext<'_>,
    ) -> Result<Option<ProjectNode>, DiscoveryError> {
        let Some(config_file) = ctx.locator().phpstan_config(&ctx.resolve(root)) else {
            return Ok(None);
        };

        let mut project = ProjectNode::new(root, hyphenate_path(root))
            .with_type(ProjectType::Library)
            .with_tags(["phpstan"]);
        project.insert_target(PHPSTAN_TARGET, self.targets.phpstan(config_file));
        Ok(Some(project))
    }
}
