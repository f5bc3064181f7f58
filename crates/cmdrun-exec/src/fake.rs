//! In-memory [`CmdRunner`] for tests of code that launches commands.
//!
//! `FakeCmdRunner` records every command it is asked to run and answers
//! with preconfigured results instead of starting processes.

use crate::command::CommandSpec;
use crate::process::ProcessHandle;
use crate::result::CommandResult;
use crate::runner::CmdRunner;
use crate::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A command seen by [`FakeCmdRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub name: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: HashMap<String, String>,
    pub use_isolated_env: bool,
    /// Everything the command would have read from stdin.
    pub stdin: Option<String>,
}

impl RecordedCommand {
    /// The program followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Test-double runner that records commands and returns canned results.
#[derive(Debug)]
pub struct FakeCmdRunner {
    results: Mutex<HashMap<String, Vec<CommandResult>>>,
    default_result: Mutex<CommandResult>,
    commands: Mutex<Vec<RecordedCommand>>,
    existing: Mutex<HashSet<String>>,
}

impl Default for FakeCmdRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCmdRunner {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            default_result: Mutex::new(CommandResult::success_with_output("")),
            commands: Mutex::new(Vec::new()),
            existing: Mutex::new(HashSet::new()),
        }
    }

    /// Queue `result` for the next run of `command_line`.
    ///
    /// Results for the same command line are returned in the order added;
    /// the last one repeats once the queue is exhausted.
    pub fn add_result(&self, command_line: impl Into<String>, result: CommandResult) {
        self.results
            .lock()
            .entry(command_line.into())
            .or_default()
            .push(result);
    }

    /// Result for command lines without a queued result.
    pub fn set_default_result(&self, result: CommandResult) {
        *self.default_result.lock() = result;
    }

    /// Make [`CmdRunner::command_exists`] report `name` as present.
    pub fn add_existing_command(&self, name: impl Into<String>) {
        self.existing.lock().insert(name.into());
    }

    /// Commands run so far, in order.
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().clone()
    }

    /// Command lines run so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands
            .lock()
            .iter()
            .map(RecordedCommand::command_line)
            .collect()
    }

    fn next_result(&self, command_line: &str) -> CommandResult {
        let mut results = self.results.lock();
        match results.get_mut(command_line) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => self.default_result.lock().clone(),
        }
    }

    async fn record(&self, mut spec: CommandSpec) -> CommandResult {
        let stdin = match spec.stdin.take() {
            Some(mut source) => {
                let mut input = Vec::new();
                if let Err(e) = source.read_to_end(&mut input).await {
                    tracing::warn!("Error reading fake stdin: {}", e);
                }
                Some(String::from_utf8_lossy(&input).into_owned())
            }
            None => None,
        };

        let recorded = RecordedCommand {
            name: spec.name.clone(),
            args: spec.args.clone(),
            working_dir: spec.working_dir.clone(),
            env: spec.env.clone(),
            use_isolated_env: spec.use_isolated_env,
            stdin,
        };
        let command_line = recorded.command_line();
        self.commands.lock().push(recorded);

        let mut result = self.next_result(&command_line);

        // Output bound to a sink never shows up in the result.
        if let Some(mut sink) = spec.stdout.take() {
            let stdout = std::mem::take(&mut result.stdout);
            if let Err(e) = sink.write_all(stdout.as_bytes()).await {
                tracing::warn!("Error writing fake stdout: {}", e);
            }
        }
        if let Some(mut sink) = spec.stderr.take() {
            let stderr = std::mem::take(&mut result.stderr);
            if let Err(e) = sink.write_all(stderr.as_bytes()).await {
                tracing::warn!("Error writing fake stderr: {}", e);
            }
        }

        result
    }
}

#[async_trait]
impl CmdRunner for FakeCmdRunner {
    async fn run_command(&self, name: &str, args: &[&str]) -> CommandResult {
        self.record(CommandSpec::new(name).args(args.iter().copied()))
            .await
    }

    async fn run_command_with_input(
        &self,
        input: &str,
        name: &str,
        args: &[&str],
    ) -> CommandResult {
        let spec = CommandSpec::new(name)
            .args(args.iter().copied())
            .stdin(std::io::Cursor::new(input.as_bytes().to_vec()));
        self.record(spec).await
    }

    async fn run_command_quietly(&self, name: &str, args: &[&str]) -> CommandResult {
        self.record(CommandSpec::new(name).args(args.iter().copied()))
            .await
    }

    async fn run_complex_command(&self, spec: CommandSpec) -> CommandResult {
        self.record(spec).await
    }

    async fn run_complex_command_async(&self, spec: CommandSpec) -> Result<ProcessHandle> {
        let command_line = spec.command_line();
        let result = self.record(spec).await;
        Ok(ProcessHandle::completed(command_line, result))
    }

    fn command_exists(&self, name: &str) -> bool {
        self.existing.lock().contains(name)
    }
}
