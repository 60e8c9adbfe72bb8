//! Library vs. application classification
//!
//! Rules run in a fixed priority order and the first one that fires decides.
//! Each discovery source picks which rules it uses; the order among the chosen
//! rules never changes.

use crate::config::DiscoveryConfig;
use crate::manifest::ComposerManifest;
use crate::project::ProjectType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClassifierRule {
    /// `type` equals the library marker.
    LibraryMarker,
    /// `type` equals the application marker.
    ApplicationMarker,
    /// Any `require-dev` entry.
    DevRequirements,
    /// A long-running script such as `serve` or `start`.
    ApplicationScripts,
}

impl ClassifierRule {
    pub const ALL: [ClassifierRule; 4] = [
        ClassifierRule::LibraryMarker,
        ClassifierRule::ApplicationMarker,
        ClassifierRule::DevRequirements,
        ClassifierRule::ApplicationScripts,
    ];
}

#[derive(Debug, Clone)]
pub struct ProjectClassifier {
    library_marker: String,
    application_marker: String,
    application_scripts: Vec<String>,
    rules: Vec<ClassifierRule>,
}

impl ProjectClassifier {
    /// Classifier using `rules`, sorted into priority order.
    pub fn new(config: &DiscoveryConfig, rules: &[ClassifierRule]) -> Self {
        let mut rules = rules.to_vec();
        rules.sort();
        rules.dedup();

        Self {
            library_marker: config.library_marker.clone(),
            application_marker: config.application_marker.clone(),
            application_scripts: config.application_scripts.clone(),
            rules,
        }
    }

    pub fn full(config: &DiscoveryConfig) -> Self {
        Self::new(config, &ClassifierRule::ALL)
    }

    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    pub fn classify(&self, manifest: &ComposerManifest) -> ProjectType {
        self.rules
            .iter()
            .find_map(|rule| self.apply(*rule, manifest))
            .unwrap_or(ProjectType::Library)
    }

    fn apply(&self, rule: ClassifierRule, manifest: &ComposerManifest) -> Option<ProjectType> {
        let package_type = manifest.package_type.as_deref();
        match rule {
            ClassifierRule::LibraryMarker => {
                (package_type == Some(self.library_marker.as_str())).then_some(ProjectType::Library)
            }
            ClassifierRule::ApplicationMarker => (package_type
                == Some(self.application_marker.as_str()))
            .then_some(ProjectType::Application),
            ClassifierRule::DevRequirements => {
                (!manifest.require_dev.is_empty()).then_some(ProjectType::Application)
            }
            ClassifierRule::ApplicationScripts => self
                .application_scripts
                .iter()
                .any(|script| manifest.scripts.contains_key(script))
                .then_some(ProjectType::Application),
        }
    }
}
