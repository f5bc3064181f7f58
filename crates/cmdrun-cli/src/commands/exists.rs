//! `cmdrun exists`: look a program up without running it.

use clap::Args;
use cmdrun_core::config::Config;
use cmdrun_exec::{CmdRunner, ExecCmdRunner};
use std::process::ExitCode;

/// Exists command arguments.
#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Program name or path
    pub program: String,
}

/// Run the exists command. Prints `true` or `false`.
pub fn run(args: ExistsArgs, config: &Config) -> ExitCode {
    let runner = ExecCmdRunner::default().with_config(&config.runner);
    let exists = runner.command_exists(&args.program);

    println!("{}", exists);
    if exists {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
