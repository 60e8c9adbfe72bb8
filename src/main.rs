use phpnx::cli::commands::{CliArgs, Commands};
use phpnx::cli::handlers::handle_discover;
use phpnx::util::{init_logging, LoggingConfig};
use phpnx::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("phpnx v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Discover(discover_args) => handle_discover(discover_args),
    };

    std::process::exit(exit_code);
}
