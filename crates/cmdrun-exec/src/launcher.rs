//! Process creation.

use crate::command::CommandSpec;
use crate::env::ResolvedEnvironment;
use crate::error::RunnerError;
use crate::Result;
use std::io;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Starts OS processes from resolved command specifications.
pub struct ProcessLauncher;

impl ProcessLauncher {
    /// Start the process described by `spec`.
    ///
    /// The environment is replaced wholesale by `env`, and the working
    /// directory is set on the child only. Stdout and stderr are always
    /// piped so they can be drained concurrently.
    pub fn launch(spec: &CommandSpec, env: &ResolvedEnvironment, stdin: Stdio) -> Result<Child> {
        let command_line = spec.command_line();

        if spec.name.is_empty() {
            return Err(RunnerError::launch_failure(
                command_line,
                "command name must not be empty",
            ));
        }

        let mut cmd = Command::new(&spec.name);
        cmd.args(&spec.args)
            .env_clear()
            .envs(env.iter())
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|e| {
            warn!(command = %command_line, "Failed to spawn command: {}", e);
            classify(spec, command_line.clone(), e)
        })?;

        debug!(command = %command_line, pid = ?child.id(), "Spawned command");
        Ok(child)
    }
}

/// Map a spawn error onto the error taxonomy.
///
/// A missing working directory also surfaces as `NotFound` from the OS, so
/// it is reported as a launch failure instead.
fn classify(spec: &CommandSpec, command_line: String, err: io::Error) -> RunnerError {
    let working_dir_exists = spec
        .working_dir
        .as_ref()
        .map_or(true, |dir| dir.is_dir());

    match err.kind() {
        io::ErrorKind::NotFound if working_dir_exists => RunnerError::NotFound {
            command: command_line,
            program: spec.name.clone(),
        },
        io::ErrorKind::NotFound => RunnerError::launch_failure(
            command_line,
            format!(
                "working directory {}: {}",
                spec.working_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_default(),
                err
            ),
        ),
        _ => RunnerError::launch_failure(command_line, err.to_string()),
    }
}
