//! The command runner façade.

use crate::command::CommandSpec;
use crate::env::{EnvironmentMerger, Platform};
use crate::launcher::ProcessLauncher;
use crate::logger::{truncate, Logger, TracingLogger};
use crate::process::ProcessHandle;
use crate::result::{CommandResult, ResultReporter};
use crate::streams::StreamBinder;
use crate::Result;
use async_trait::async_trait;
use cmdrun_core::config::RunnerConfig;
use std::ffi::OsString;
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::oneshot;

const LOG_TAG: &str = "Cmd Runner";

/// Launches commands and reports their results.
#[async_trait]
pub trait CmdRunner: Send + Sync {
    /// Run `name` with `args` and wait for it to finish.
    async fn run_command(&self, name: &str, args: &[&str]) -> CommandResult;

    /// Run `name` with `args`, feeding `input` to its stdin.
    async fn run_command_with_input(&self, input: &str, name: &str, args: &[&str])
        -> CommandResult;

    /// Like [`CmdRunner::run_command`], logging at debug level only.
    async fn run_command_quietly(&self, name: &str, args: &[&str]) -> CommandResult;

    /// Run a full command specification and wait for it to finish.
    async fn run_complex_command(&self, spec: CommandSpec) -> CommandResult;

    /// Start a command and return as soon as it is running.
    ///
    /// Fails without a handle when the process cannot be started.
    async fn run_complex_command_async(&self, spec: CommandSpec) -> Result<ProcessHandle>;

    /// Check whether `name` resolves to an executable, without running it.
    fn command_exists(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Normal,
    Quiet,
}

/// [`CmdRunner`] backed by real OS processes.
pub struct ExecCmdRunner {
    logger: Arc<dyn Logger>,
    merger: EnvironmentMerger,
    ambient_env: Option<Vec<(OsString, OsString)>>,
    log_output_limit: usize,
}

impl Default for ExecCmdRunner {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl ExecCmdRunner {
    /// Create a runner that logs through `logger`.
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            merger: EnvironmentMerger::new(Platform::native()),
            ambient_env: None,
            log_output_limit: RunnerConfig::default().log_output_limit,
        }
    }

    /// Apply runner settings from configuration.
    pub fn with_config(mut self, config: &RunnerConfig) -> Self {
        self.log_output_limit = config.log_output_limit;
        self
    }

    /// Use the environment semantics of `platform` instead of the native ones.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.merger = EnvironmentMerger::new(platform);
        self
    }

    /// Use `vars` as the ambient environment instead of this process's
    /// environment.
    pub fn with_ambient_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        self.ambient_env = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Like [`CmdRunner::run_complex_command`], logging at debug level only.
    pub async fn run_complex_command_quietly(&self, spec: CommandSpec) -> CommandResult {
        self.run(spec, Verbosity::Quiet).await
    }

    /// Snapshot of the ambient environment for one invocation.
    fn ambient_env(&self) -> Vec<(OsString, OsString)> {
        match &self.ambient_env {
            Some(vars) => vars.clone(),
            None => cmdrun_core::env::snapshot(),
        }
    }

    fn log(&self, verbosity: Verbosity, message: &str) {
        match verbosity {
            Verbosity::Normal => self.logger.info(LOG_TAG, message),
            Verbosity::Quiet => self.logger.debug(LOG_TAG, message),
        }
    }

    /// Merge the environment, bind streams and start the process.
    ///
    /// Must be called from within a tokio runtime.
    fn start(&self, mut spec: CommandSpec) -> Result<ProcessHandle> {
        let command_line = spec.command_line();

        let env = self
            .merger
            .merge(self.ambient_env(), &spec.env, spec.use_isolated_env)?;

        let binder = StreamBinder::new(
            spec.stdin.take(),
            spec.stdout.take(),
            spec.stderr.take(),
        );

        let mut child = ProcessLauncher::launch(&spec, &env, binder.stdin_stdio())?;
        let pid = child.id();
        let drains = binder.attach(&mut child);

        let (tx, rx) = oneshot::channel();
        let reported_line = command_line.clone();
        tokio::spawn(async move {
            let (status, captured) = tokio::join!(child.wait(), drains.finish());
            let result = ResultReporter::report(&reported_line, status, captured);
            // Fails only when the handle was dropped.
            let _ = tx.send(result);
        });

        Ok(ProcessHandle::new(pid, command_line, rx))
    }

    async fn run(&self, spec: CommandSpec, verbosity: Verbosity) -> CommandResult {
        let command_line = spec.command_line();
        match &spec.working_dir {
            Some(dir) => self.log(
                verbosity,
                &format!("Running command '{}' in {}", command_line, dir.display()),
            ),
            None => self.log(verbosity, &format!("Running command '{}'", command_line)),
        }

        let result = match self.start(spec) {
            Ok(handle) => handle.wait().await.clone(),
            Err(e) => CommandResult::from_error(e),
        };

        self.log(
            verbosity,
            &format!(
                "Stdout: {}\nStderr: {}\nSuccessful: {} ({})",
                truncate(&result.stdout, self.log_output_limit),
                truncate(&result.stderr, self.log_output_limit),
                result.success(),
                result.exit_status
            ),
        );
        result
    }
}

fn simple_spec(name: &str, args: &[&str]) -> CommandSpec {
    CommandSpec::new(name).args(args.iter().copied())
}

#[async_trait]
impl CmdRunner for ExecCmdRunner {
    async fn run_command(&self, name: &str, args: &[&str]) -> CommandResult {
        self.run(simple_spec(name, args), Verbosity::Normal).await
    }

    async fn run_command_with_input(
        &self,
        input: &str,
        name: &str,
        args: &[&str],
    ) -> CommandResult {
        let spec = simple_spec(name, args).stdin(Cursor::new(input.as_bytes().to_vec()));
        self.run(spec, Verbosity::Normal).await
    }

    async fn run_command_quietly(&self, name: &str, args: &[&str]) -> CommandResult {
        self.run(simple_spec(name, args), Verbosity::Quiet).await
    }

    async fn run_complex_command(&self, spec: CommandSpec) -> CommandResult {
        self.run(spec, Verbosity::Normal).await
    }

    async fn run_complex_command_async(&self, spec: CommandSpec) -> Result<ProcessHandle> {
        self.log(
            Verbosity::Normal,
            &format!("Running command '{}'", spec.command_line()),
        );
        self.start(spec)
    }

    fn command_exists(&self, name: &str) -> bool {
        !name.is_empty() && which::which(name).is_ok()
    }
}

impl std::fmt::Debug for ExecCmdRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecCmdRunner")
            .field("platform", &self.merger.platform())
            .field("ambient_env", &self.ambient_env.as_ref().map(Vec::len))
            .field("log_output_limit", &self.log_output_limit)
            .finish()
    }
}
