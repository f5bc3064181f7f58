//! cmdrun command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use cmdrun_core::config::{Config, LogLevel, LoggingConfig};
use cmdrun_core::env::vars;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// cmdrun - run external commands with predictable results
#[derive(Parser, Debug)]
#[command(name = "cmdrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = vars::CMDRUN_CONFIG, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command and report its output and exit status
    Run(commands::run::RunArgs),

    /// Check whether a program can be found, without running it
    Exists(commands::exists::ExistsArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Default log directive for the configured level and `-v` count.
pub fn log_directive(level: LogLevel, verbose: u8) -> &'static str {
    match verbose {
        0 => level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. Logs go to stderr.
///
/// `CMDRUN_LOG` takes precedence over both the config and `-v`.
pub fn init_logging(logging: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_env(vars::CMDRUN_LOG)
        .unwrap_or_else(|_| EnvFilter::new(log_directive(logging.level, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the configuration from `path` (or the default path) and validate it.
///
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

/// Run the CLI with the given arguments and loaded configuration.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => commands::run::run(args, &config).await,
        Commands::Exists(args) => Ok(commands::exists::run(args, &config)),
        Commands::Config(args) => {
            commands::config::run(args, &config, cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("cmdrun {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}
