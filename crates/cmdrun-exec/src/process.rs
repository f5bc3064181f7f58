//! Handles to started processes.

use crate::error::RunnerError;
use crate::result::CommandResult;
use tokio::sync::{oneshot, Mutex, OnceCell};

/// A started process whose result is delivered once and then cached.
///
/// `wait` may be called any number of times, from any number of tasks; all
/// callers observe the same result.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: Option<u32>,
    command_line: String,
    completion: Mutex<Option<oneshot::Receiver<CommandResult>>>,
    result: OnceCell<CommandResult>,
}

impl ProcessHandle {
    pub(crate) fn new(
        pid: Option<u32>,
        command_line: String,
        completion: oneshot::Receiver<CommandResult>,
    ) -> Self {
        Self {
            pid,
            command_line,
            completion: Mutex::new(Some(completion)),
            result: OnceCell::new(),
        }
    }

    /// A handle that has already completed with `result`.
    pub fn completed(command_line: impl Into<String>, result: CommandResult) -> Self {
        Self {
            pid: None,
            command_line: command_line.into(),
            completion: Mutex::new(None),
            result: OnceCell::new_with(Some(result)),
        }
    }

    /// OS process id, if the process was started by the OS.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// The command line this handle was started for.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Wait for the process to exit and all of its output to be drained.
    pub async fn wait(&self) -> &CommandResult {
        self.result
            .get_or_init(|| async {
                // The receiver stays in its slot until it resolves. A
                // cancelled waiter must not drop it.
                let mut slot = self.completion.lock().await;
                let delivered = match slot.as_mut() {
                    Some(receiver) => receiver.await.ok(),
                    None => None,
                };
                *slot = None;
                delivered.unwrap_or_else(|| {
                    CommandResult::from_error(RunnerError::io_failure(
                        &self.command_line,
                        "process completion was never delivered",
                    ))
                })
            })
            .await
    }

    /// The result, if it has already been delivered to a waiter.
    pub fn try_result(&self) -> Option<&CommandResult> {
        self.result.get()
    }
}
