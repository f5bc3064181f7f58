//! Configuration commands.

use clap::Args;
use cmdrun_core::config::Config;
use cmdrun_core::paths;
use std::path::{Path, PathBuf};

/// Config command arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration as JSON
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

/// Run the config command.
pub fn run(args: ConfigArgs, config: &Config, config_path: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }

        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(config)?;
            match lookup(&json, &key) {
                Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
                None => anyhow::bail!("Key not found: {}", key),
            }
        }

        ConfigCommand::Path => {
            let path = match config_path {
                Some(path) => PathBuf::from(path),
                None => paths::config_file()?,
            };
            println!("{}", path.display());
        }

        ConfigCommand::Validate => match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => anyhow::bail!("Configuration error: {}", e),
        },
    }

    Ok(())
}

/// Walk a dot-separated key path through a JSON value.
fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    key.split('.')
        .try_fold(json, |value, part| value.get(part))
}
