pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DiscoverArgs};
pub use output::{OutputFormat, OutputFormatter};
