use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() {
    // Initialize tracing on stderr so command output stays parseable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dataview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from(cli.json);

    let result = match &cli.command {
        Commands::Keys(args) => commands::keys::run(args, &cli.separator, format),
        Commands::Get(args) => commands::get::run(args, &cli.separator, format),
        Commands::Convert(args) => commands::convert::run(args),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
