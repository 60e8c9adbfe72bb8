//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Read-only view of the workspace used by discovery.
///
/// Discovery never writes, so the capability is limited to existence checks
/// and reading text.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
