use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Project discovery for PHP monorepos
#[derive(Parser, Debug)]
#[command(
    name = "phpnx",
    about = "Discover PHP projects, their targets and their dependencies",
    version,
    author,
    long_about = "phpnx walks a workspace for composer.json, PHPUnit and PHPStan config files, \
                  turns each directory into a typed project with runnable targets and infers \
                  dependency edges from composer requirements."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Discover projects in a workspace",
        long_about = "Scans the workspace, runs every enabled discovery source and prints the \
                      merged project graph.\n\n\
                      Examples:\n  \
                      phpnx discover\n  \
                      phpnx discover /path/to/monorepo --format text\n  \
                      phpnx discover --source composer --source phpstan --dedup-edges"
    )]
    Discover(DiscoverArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverArgs {
    #[arg(
        value_name = "WORKSPACE",
        help = "Workspace root (defaults to current directory)"
    )]
    pub workspace: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Discovery config file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 's',
        long = "source",
        value_name = "ID",
        help = "Enable only these sources (composer, composer-basic, phpunit, phpstan)"
    )]
    pub sources: Vec<String>,

    #[arg(long, help = "Collapse duplicate dependency edges between the same projects")]
    pub dedup_edges: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Text,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Text => super::output::OutputFormat::Text,
        }
    }
}
