use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use farmops::cli::{self, Cli};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();
    process::exit(cli::run(cli_args));
}
