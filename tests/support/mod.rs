#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

/// Small monorepo: two libraries, an application and a root manifest.
pub fn create_monorepo() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    write(
        root,
        "composer.json",
        r#"{
    "name": "acme/monorepo",
    "require-dev": {"phpstan/phpstan": "^1.10"}
}"#,
    );

    write(
        root,
        "packages/core/composer.json",
        r#"{
    "name": "acme/core",
    "type": "library",
    "keywords": ["core"],
    "autoload": {"psr-4": {"Acme\\Core\\": "src/"}}
}"#,
    );
    write(root, "packages/core/phpunit.xml.dist", "<phpunit/>");
    write(root, "packages/core/phpstan.neon", "parameters:\n  level: 8\n");

    write(
        root,
        "packages/http-client/composer.json",
        r#"{
    "name": "acme/http-client",
    "type": "library",
    "require": {"acme/core": "^1.0", "guzzlehttp/guzzle": "^7.0"}
}"#,
    );

    write(
        root,
        "apps/api/composer.json",
        r#"{
    "name": "acme/api",
    "type": "project",
    "require": {"php": "^8.2", "acme/core": "^1.0", "acme/http-client": "^1.0"},
    "require-dev": {"acme/core": "^1.0", "phpunit/phpunit": "^10.0"},
    "scripts": {"serve": "php -S localhost:8000 -t public", "test": ["@phpstan", "phpunit"]}
}"#,
    );
    write(root, "apps/api/phpunit.xml", "<phpunit/>");
    write(
        root,
        "apps/api/vendor/acme/core/composer.json",
        r#"{"name": "acme/core"}"#,
    );
    write(root, "node_modules/some-tool/composer.json", "{}");

    dir
}
