//! Project identifiers and workspace-relative path helpers
//!
//! Paths handled here are plain workspace-relative strings as handed to
//! discovery. Both `/` and `\` count as separators regardless of the host
//! platform, so a layout written on Windows resolves to the same names.

use crate::manifest::ComposerManifest;

/// Root used for a marker file that sits at the top of the workspace.
pub const WORKSPACE_ROOT: &str = ".";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Splits a marker-file path into its project root and file name.
pub fn split_config_path(path: &str) -> (&str, &str) {
    match path.rfind(is_separator) {
        Some(0) => (WORKSPACE_ROOT, &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (WORKSPACE_ROOT, path),
    }
}

pub fn file_name(path: &str) -> &str {
    split_config_path(path).1
}

/// Last directory segment of a root, used by sources that name projects
/// after their folder.
pub fn last_segment(root: &str) -> &str {
    root.rsplit(is_separator)
        .find(|segment| !segment.is_empty())
        .unwrap_or(root)
}

/// `packages/some-lib` → `packages-some-lib`
pub fn hyphenate_path(root: &str) -> String {
    root.replace(is_separator, "-")
}

/// `vendor/package` → `vendor-package`
pub fn hyphenate_package(name: &str) -> String {
    name.replace('/', "-")
}

/// Package segment after the vendor separator, if there is one.
pub fn package_segment(name: &str) -> Option<&str> {
    name.split_once('/').map(|(_, package)| package)
}

/// Replaces every character outside `[A-Za-z0-9]` with `-`.
pub fn normalize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Joins a path below a project root, keeping `/` as the separator.
pub fn join_root(root: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches("./");
    if root.is_empty() || root == WORKSPACE_ROOT {
        relative.to_string()
    } else {
        format!("{}/{}", root, relative).replace('\\', "/")
    }
}

/// Canonical identifier for a project: the hyphenated package name when the
/// manifest declares one, otherwise the hyphenated root path.
pub fn resolve_name(manifest: &ComposerManifest, root: &str) -> String {
    match manifest.name.as_deref() {
        Some(name) if !name.is_empty() => hyphenate_package(name),
        _ => hyphenate_path(root),
    }
}
