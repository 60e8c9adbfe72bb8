//! Filesystem capability injected into manifest parsing and config-file lookup

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
