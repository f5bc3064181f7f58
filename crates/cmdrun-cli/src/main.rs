//! cmdrun CLI entry point.

use clap::Parser;
use cmdrun_cli::{init_logging, load_config, run, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    run(cli, config).await
}
