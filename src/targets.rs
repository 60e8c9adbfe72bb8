//! Target derivation from manifests and located config files

use crate::config::DiscoveryConfig;
use crate::manifest::{ComposerManifest, LOCK_FILE, MANIFEST_FILE};
use crate::project::{TargetHelp, TargetMetadata, TargetSpec};

pub const INSTALL_TARGET: &str = "install";
pub const UPDATE_TARGET: &str = "update";
pub const VALIDATE_TARGET: &str = "validate";
pub const TEST_TARGET: &str = "test";
pub const PHPUNIT_TARGET: &str = "phpunit";
pub const PHPSTAN_TARGET: &str = "phpstan";

const PHPUNIT_BIN: &str = "vendor/bin/phpunit";
const PHPSTAN_BIN: &str = "vendor/bin/phpstan";

/// Placeholder the host tool replaces with the project root in input globs.
pub const PROJECT_ROOT_TOKEN: &str = "{projectRoot}";

/// Builds target specs. Pure: the same manifest and config-file name always
/// produce the same targets.
#[derive(Debug, Clone)]
pub struct TargetSynthesizer {
    test_runner_package: String,
}

impl TargetSynthesizer {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            test_runner_package: config.test_runner_package.clone(),
        }
    }

    pub fn install(&self) -> TargetSpec {
        TargetSpec::new("composer install")
    }

    pub fn update(&self) -> TargetSpec {
        TargetSpec::new("composer update")
    }

    pub fn validate(&self) -> TargetSpec {
        TargetSpec::new("composer validate")
    }

    /// Test target, if the project shows any sign of having tests.
    ///
    /// An explicit `test` script wins; otherwise PHPUnit runs against the
    /// located config file, or with its own defaults when none was found.
    pub fn test(
        &self,
        manifest: &ComposerManifest,
        phpunit_config: Option<&str>,
    ) -> Option<TargetSpec> {
        let script = manifest.scripts.get(TEST_TARGET);
        let has_runner = manifest.require_dev.contains_key(&self.test_runner_package);

        if script.is_none() && phpunit_config.is_none() && !has_runner {
            return None;
        }

        let command = match (script, phpunit_config) {
            (Some(script), _) => script.to_command(),
            (None, Some(config_file)) => format!("{} --configuration {}", PHPUNIT_BIN, config_file),
            (None, None) => PHPUNIT_BIN.to_string(),
        };

        Some(TargetSpec::new(command).depends_on(INSTALL_TARGET))
    }

    /// install, update, validate and, when applicable, test.
    pub fn full_set(
        &self,
        manifest: &ComposerManifest,
        phpunit_config: Option<&str>,
    ) -> Vec<(&'static str, TargetSpec)> {
        let mut targets = vec![
            (INSTALL_TARGET, self.install()),
            (UPDATE_TARGET, self.update()),
            (VALIDATE_TARGET, self.validate()),
        ];
        if let Some(test) = self.test(manifest, phpunit_config) {
            targets.push((TEST_TARGET, test));
        }
        targets
    }

    pub fn phpunit(&self, config_file: &str) -> TargetSpec {
        let example_options = [
            ("--coverage-text", "Generate text coverage report"),
            ("--filter", "Run only tests matching the given pattern"),
            ("--group", "Run tests from the specified group(s)"),
            ("--testsuite", "Run tests from the specified test suite"),
        ]
        .into_iter()
        .map(|(flag, help)| (flag.to_string(), help.to_string()))
        .collect();

        TargetSpec::new(format!("{} --configuration {}", PHPUNIT_BIN, config_file)).with_metadata(
            TargetMetadata {
                technologies: vec!["phpunit".to_string()],
                description: "Run PHPUnit tests".to_string(),
                help: Some(TargetHelp {
                    command: "npx nx phpunit --help".to_string(),
                    example_options,
                }),
            },
        )
    }

    /// Static analysis. Cacheable, since it only reads sources and config.
    pub fn phpstan(&self, config_file: &str) -> TargetSpec {
        TargetSpec::new(format!("{} analyze --configuration={}", PHPSTAN_BIN, config_file))
            .with_inputs([
                format!("{}/**/*.php", PROJECT_ROOT_TOKEN),
                format!("{}/{}", PROJECT_ROOT_TOKEN, config_file),
                format!("{}/{}", PROJECT_ROOT_TOKEN, MANIFEST_FILE),
                format!("{}/{}", PROJECT_ROOT_TOKEN, LOCK_FILE),
            ])
            .with_outputs(Vec::new())
            .cacheable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{parse_manifest, ManifestFormat};

    fn synth() -> TargetSynthesizer {
        TargetSynthesizer::new(&DiscoveryConfig::default())
    }

    fn manifest(json: &str) -> ComposerManifest {
        parse_manifest(json, ManifestFormat::Json).unwrap()
    }

    #[test]
    fn test_common_commands() {
        let s = synth();
        assert_eq!(s.install().command, "composer install");
        assert_eq!(s.update().command, "composer update");
        assert_eq!(s.validate().command, "composer validate");
    }

    #[test]
    fn test_no_test_target_without_signals() {
        let m = manifest(r#"{"name": "a/b", "require-dev": {"mockery/mockery": "^1"}}"#);
        assert!(synth().test(&m, None).is_none());

        let names: Vec<&str> = synth().full_set(&m, None).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["install", "update", "validate"]);
    }

    #[test]
    fn test_runner_dev_dependency() {
        let m = manifest(r#"{"require-dev": {"phpunit/phpunit": "^9.0"}}"#);
        let test = synth().test(&m, None).unwrap();

        assert_eq!(test.command, "vendor/bin/phpunit");
        assert_eq!(test.depends_on, vec!["install"]);
    }

    #[test]
    fn test_located_config_is_referenced() {
        let m = manifest(r#"{"name": "a/b"}"#);
        let test = synth().test(&m, Some("phpunit.xml.dist")).unwrap();

        assert_eq!(test.command, "vendor/bin/phpunit --configuration phpunit.xml.dist");
    }

    #[test]
    fn test_script_takes_precedence() {
        let m = manifest(
            r#"{"scripts": {"test": "vendor/bin/phpunit --coverage-clover coverage.xml"}, "require-dev": {"phpunit/phpunit": "^9"}}"#,
        );
        let test = synth().test(&m, Some("phpunit.xml")).unwrap();

        assert_eq!(test.command, "vendor/bin/phpunit --coverage-clover coverage.xml");
    }

    #[test]
    fn test_script_steps_are_chained() {
        let m = manifest(r#"{"scripts": {"test": ["@lint", "phpunit"]}}"#);
        assert_eq!(synth().test(&m, None).unwrap().command, "@lint && phpunit");
    }

    #[test]
    fn test_phpunit_target() {
        let target = synth().phpunit(".phpunit.xml");
        assert_eq!(target.command, "vendor/bin/phpunit --configuration .phpunit.xml");

        let metadata = target.metadata.unwrap();
        assert!(metadata.technologies.contains(&"phpunit".to_string()));
        assert_eq!(metadata.description, "Run PHPUnit tests");
        let help = metadata.help.unwrap();
        assert!(help.example_options.contains_key("--coverage-text"));
        assert!(help.example_options.contains_key("--filter"));
        assert!(help.example_options.contains_key("--group"));
    }

    #[test]
    fn test_phpstan_target() {
        let target = synth().phpstan("phpstan.neon");

        assert_eq!(target.command, "vendor/bin/phpstan analyze --configuration=phpstan.neon");
        assert_eq!(
            target.inputs,
            vec![
                "{projectRoot}/**/*.php",
                "{projectRoot}/phpstan.neon",
                "{projectRoot}/composer.json",
                "{projectRoot}/composer.lock",
            ]
        );
        assert_eq!(target.outputs, Some(vec![]));
        assert!(target.cacheable);
    }
}
