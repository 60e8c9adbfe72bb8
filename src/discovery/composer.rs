//! composer.json source with the full target set

use super::{DiscoveryContext, DiscoverySource};
use crate::classify::ProjectClassifier;
use crate::config::{DiscoveryConfig, SourceId};
use crate::error::DiscoveryError;
use crate::manifest::{AutoloadPath, ComposerManifest, MANIFEST_FILE};
use crate::naming::{join_root, resolve_name, WORKSPACE_ROOT};
use crate::project::ProjectNode;
use crate::targets::TargetSynthesizer;

/// Every `composer.json` becomes a project with install, update, validate
/// and (when the project has tests) test targets.
pub struct ComposerSource {
    classifier: ProjectClassifier,
    targets: TargetSynthesizer,
}

impl ComposerSource {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            classifier: ProjectClassifier::full(config),
            targets: TargetSynthesizer::new(config),
        }
    }

    fn build(
        &self,
        manifest: &ComposerManifest,
        root: &str,
        phpunit_config: Option<&str>,
    ) -> ProjectNode {
        ProjectNode::new(root, resolve_name(manifest, root))
            .with_type(self.classifier.classify(manifest))
            .with_source_root(source_root(manifest, root))
            .with_tags(tags(manifest))
            .with_targets(self.targets.full_set(manifest, phpunit_config))
    }
}

impl DiscoverySource for ComposerSource {
    fn id(&self) -> SourceId {
        SourceId::Composer
    }

    fn pattern(&self) -> &'static str {
        "**/composer.json"
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
        let Some(manifest) = ctx.manifests().parse(&ctx.resolve(config_path)) else {
            return Ok(None);
        };
        let phpunit_config = ctx.locator().phpunit_config(&ctx.resolve(root));

        Ok(Some(self.build(&manifest, root, phpunit_config)))
    }
}

/// First PSR-4 directory in declaration order, or `<root>/src` when the
/// manifest has no PSR-4 autoloading at all. A declared but empty PSR-4 map
/// leaves the source root unset.
fn source_root(manifest: &ComposerManifest, root: &str) -> Option<String> {
    let Some(psr4) = manifest.psr4() else {
        return Some(join_root(root, "src"));
    };

    let dir = psr4.values().next().and_then(AutoloadPath::first)?;
    let dir = dir.trim_end_matches(|c: char| c == '/' || c == '\\');
    if dir.is_empty() || dir == WORKSPACE_ROOT {
        Some(root.to_string())
    } else {
        Some(join_root(root, dir))
    }
}

fn tags(manifest: &ComposerManifest) -> Vec<String> {
    manifest
        .package_type
        .iter()
        .map(|t| format!("composer:{}", t))
        .chain(manifest.keywords().iter().map(|k| format!("keyword:{}", k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NoopDiagnostics, RecordingDiagnostics};
    use crate::discovery::DiscoveryEngine;
    use crate::fs::MockFileSystem;
    use crate::project::{DiscoveryResult, ProjectType};
    use std::path::Path;

    fn discover(fs: &MockFileSystem, paths: &[&str]) -> Vec<(String, DiscoveryResult)> {
        let ctx = DiscoveryContext::new(Path::new("/workspace"), fs, &NoopDiagnostics);
        let source = ComposerSource::new(&DiscoveryConfig::default());
        DiscoveryEngine::new(ctx).discover(&source, paths)
    }

    fn workspace(files: &[(&str, &str)]) -> MockFileSystem {
        let fs = MockFileSystem::with_root("/workspace");
        for (path, content) in files {
            fs.add_file(path, content);
        }
        fs
    }

    fn single(fs: &MockFileSystem, path: &str, root: &str) -> ProjectNode {
        let results = discover(fs, &[path]);
        results[0]
            .1
            .project(root)
            .cloned()
            .unwrap_or_else(|| panic!("no project at {}", root))
    }

    #[test]
    fn test_basic_library() {
        let fs = workspace(&[(
            "packages/my-lib/composer.json",
            r#"{"name": "vendor/package", "type": "library", "description": "A test package", "require": {"php": "^8.0"}}"#,
        )]);

        let results = discover(&fs, &["packages/my-lib/composer.json"]);
        assert_eq!(results[0].0, "packages/my-lib/composer.json");

        let project = results[0].1.project("packages/my-lib").unwrap();
        assert_eq!(project.name, "vendor-package");
        assert_eq!(project.project_type, Some(ProjectType::Library));
        assert_eq!(project.root, "packages/my-lib");
        assert_eq!(project.source_root.as_deref(), Some("packages/my-lib/src"));
        assert!(project.tags.contains(&"composer:library".to_string()));
    }

    #[test]
    fn test_require_dev_application_gets_test_target() {
        let fs = workspace(&[(
            "my-app/composer.json",
            r#"{"name": "my/app", "require-dev": {"phpunit/phpunit": "^9.0"}}"#,
        )]);

        let project = single(&fs, "my-app/composer.json", "my-app");
        assert_eq!(project.project_type, Some(ProjectType::Application));

        let test = project.target("test").unwrap();
        assert_eq!(test.command, "vendor/bin/phpunit");
        assert_eq!(test.depends_on, vec!["install"]);
    }

    #[test]
    fn test_scripts_application() {
        let fs = workspace(&[(
            "console-app/composer.json",
            r#"{"name": "my/console-app", "scripts": {"start": "php bin/console", "test": "phpunit"}}"#,
        )]);

        let project = single(&fs, "console-app/composer.json", "console-app");
        assert_eq!(project.project_type, Some(ProjectType::Application));
        assert_eq!(project.target("test").unwrap().command, "phpunit");
    }

    #[test]
    fn test_name_from_directory() {
        let fs = workspace(&[("packages/some-lib/composer.json", r#"{"type": "library"}"#)]);

        let project = single(&fs, "packages/some-lib/composer.json", "packages/some-lib");
        assert_eq!(project.name, "packages-some-lib");
    }

    #[test]
    fn test_psr4_source_root() {
        let fs = workspace(&[(
            "test-package/composer.json",
            r#"{"name": "test/package", "autoload": {"psr-4": {"Test\\Package\\": "lib/"}}}"#,
        )]);

        let project = single(&fs, "test-package/composer.json", "test-package");
        assert_eq!(project.source_root.as_deref(), Some("test-package/lib"));
    }

    #[test]
    fn test_first_psr4_directory_wins() {
        let fs = workspace(&[(
            "multi-src/composer.json",
            r#"{"name": "test/multi-src", "autoload": {"psr-4": {
                "Test\\Core\\": "src/Core/",
                "Test\\Utils\\": "src/Utils/",
                "Test\\Main\\": "lib/"
            }}}"#,
        )]);

        let project = single(&fs, "multi-src/composer.json", "multi-src");
        assert_eq!(project.source_root.as_deref(), Some("multi-src/src/Core"));
    }

    #[test]
    fn test_psr4_edge_cases() {
        let fs = workspace(&[
            ("empty/composer.json", r#"{"autoload": {"psr-4": {}}}"#),
            ("rooted/composer.json", r#"{"autoload": {"psr-4": {"App\\": ""}}}"#),
            ("fallback/composer.json", r#"{"autoload": {"psr-4": {"App\\": ["app/", "legacy/"]}}}"#),
        ]);

        assert_eq!(single(&fs, "empty/composer.json", "empty").source_root, None);
        assert_eq!(
            single(&fs, "rooted/composer.json", "rooted").source_root.as_deref(),
            Some("rooted")
        );
        assert_eq!(
            single(&fs, "fallback/composer.json", "fallback").source_root.as_deref(),
            Some("fallback/app")
        );
    }

    #[test]
    fn test_common_targets() {
        let fs = workspace(&[("test-package/composer.json", r#"{"name": "test/package"}"#)]);

        let project = single(&fs, "test-package/composer.json", "test-package");
        for name in ["install", "update", "validate"] {
            assert!(project.target(name).is_some(), "missing {}", name);
        }
        assert!(project.target("test").is_none());

        let install = project.target("install").unwrap();
        assert_eq!(install.command, "composer install");
        assert_eq!(install.working_directory, "test-package");
    }

    #[test]
    fn test_phpunit_config_adds_test_target() {
        let fs = workspace(&[
            ("lib/composer.json", r#"{"name": "acme/lib"}"#),
            ("lib/phpunit.xml.dist", "<phpunit/>"),
        ]);

        let project = single(&fs, "lib/composer.json", "lib");
        assert_eq!(
            project.target("test").unwrap().command,
            "vendor/bin/phpunit --configuration phpunit.xml.dist"
        );
    }

    #[test]
    fn test_tags_from_type_and_keywords() {
        let fs = workspace(&[(
            "test-package/composer.json",
            r#"{"name": "test/package", "type": "library", "keywords": ["testing", "php", "utility"]}"#,
        )]);

        let project = single(&fs, "test-package/composer.json", "test-package");
        assert_eq!(
            project.tags,
            vec!["composer:library", "keyword:testing", "keyword:php", "keyword:utility"]
        );
    }

    #[test]
    fn test_nested_project() {
        let fs = workspace(&[(
            "packages/vendor/nested-project/composer.json",
            r#"{"name": "nested/project", "type": "library"}"#,
        )]);

        let project = single(
            &fs,
            "packages/vendor/nested-project/composer.json",
            "packages/vendor/nested-project",
        );
        assert_eq!(project.name, "nested-project");
        assert_eq!(project.root, "packages/vendor/nested-project");
    }

    #[test]
    fn test_invalid_json_gives_empty_result() {
        let fs = workspace(&[("invalid-project/composer.json", "invalid json content")]);
        let sink = RecordingDiagnostics::new();
        let ctx = DiscoveryContext::new(Path::new("/workspace"), &fs, &sink);
        let source = ComposerSource::new(&DiscoveryConfig::default());

        let results = DiscoveryEngine::new(ctx).discover(&source, &["invalid-project/composer.json"]);
        assert!(results[0].1.is_empty());
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_missing_manifest_gives_empty_result() {
        let fs = workspace(&[]);
        let results = discover(&fs, &["non-existent/composer.json"]);
        assert!(results[0].1.is_empty());
    }

    #[test]
    fn test_multiple_manifests() {
        let fs = workspace(&[
            ("package-one/composer.json", r#"{"name": "package/one", "type": "library"}"#),
            (
                "package-two/composer.json",
                r#"{"name": "package/two", "require-dev": {"phpunit/phpunit": "^9.0"}}"#,
            ),
        ]);

        let results = discover(&fs, &["package-one/composer.json", "package-two/composer.json"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "package-one/composer.json");
        assert_eq!(
            results[0].1.project("package-one").unwrap().project_type,
            Some(ProjectType::Library)
        );
        assert_eq!(results[1].0, "package-two/composer.json");
        assert_eq!(
            results[1].1.project("package-two").unwrap().project_type,
            Some(ProjectType::Application)
        );
    }

    #[test]
    fn test_rediscovery_is_identical() {
        let fs = workspace(&[
            ("a/composer.json", r#"{"name": "acme/a", "keywords": ["x"]}"#),
            ("a/phpunit.xml", "<phpunit/>"),
        ]);

        let first = discover(&fs, &["a/composer.json"]);
        let second = discover(&fs, &["a/composer.json"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_level_manifest() {
        let fs = workspace(&[("composer.json", r#"{"name": "acme/monolith"}"#)]);

        let project = single(&fs, "composer.json", ".");
        assert_eq!(project.name, "acme-monolith");
        assert_eq!(project.source_root.as_deref(), Some("src"));
        assert_eq!(project.target("install").unwrap().working_directory, ".");
    }
}
