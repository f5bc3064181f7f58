//! `cmdrun run`: launch one command and mirror its result.

use clap::Args;
use cmdrun_core::config::{Config, RunnerConfig};
use cmdrun_core::env::parse_assignment;
use cmdrun_exec::{CmdRunner, CommandResult, CommandSpec, ErrorKind, ExecCmdRunner};
use std::io::Cursor;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code used when the program cannot be found, as in POSIX shells.
pub const NOT_FOUND_EXIT_CODE: u8 = 127;

/// Run command arguments.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Log at debug level only
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not inherit the environment of cmdrun
    #[arg(long)]
    pub isolated: bool,

    /// Set an environment variable (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env)]
    pub env: Vec<(String, String)>,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Text fed to the command's stdin
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Program followed by its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn parse_env(s: &str) -> Result<(String, String), String> {
    parse_assignment(s).ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

/// Build the command specification from arguments over configured defaults.
///
/// Variables given on the command line override configured ones.
pub fn build_spec(args: RunArgs, runner: &RunnerConfig) -> CommandSpec {
    let mut command = args.command.into_iter();
    let name = command.next().unwrap_or_default();

    let mut spec = CommandSpec::new(name)
        .args(command)
        .envs(runner.env.clone())
        .envs(args.env)
        .isolated_env(args.isolated || runner.isolated_env);

    if let Some(dir) = args.cwd.or_else(|| runner.working_dir.clone()) {
        spec = spec.working_dir(dir);
    }
    if let Some(input) = args.input {
        spec = spec.stdin(Cursor::new(input.into_bytes()));
    }
    spec
}

/// Map a result onto the exit code of this process.
pub fn exit_code(result: &CommandResult) -> u8 {
    match &result.error {
        None => 0,
        Some(e) if e.kind() == ErrorKind::NotFound => NOT_FOUND_EXIT_CODE,
        Some(e) if e.kind() == ErrorKind::NonZeroExit => {
            u8::try_from(result.exit_status).ok().filter(|code| *code != 0).unwrap_or(1)
        }
        Some(_) => 1,
    }
}

/// Run the run command.
pub async fn run(args: RunArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let quiet = args.quiet;
    let spec = build_spec(args, &config.runner);
    let runner = ExecCmdRunner::default().with_config(&config.runner);

    let result = if quiet {
        runner.run_complex_command_quietly(spec).await
    } else {
        runner.run_complex_command(spec).await
    };

    print!("{}", result.stdout);
    eprint!("{}", result.stderr);

    match &result.error {
        Some(e) if e.kind() == ErrorKind::NonZeroExit => {
            tracing::debug!("{}", e);
        }
        Some(e) => eprintln!("cmdrun: {}", e),
        None => {}
    }

    Ok(ExitCode::from(exit_code(&result)))
}
