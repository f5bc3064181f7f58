//! Cross-platform command execution for cmdrun.
//!
//! This crate launches external processes and reports their outcome through a
//! single result shape:
//! - Environment merging with per-platform key comparison rules
//! - Stream binding with concurrent stdout/stderr draining
//! - Synchronous and asynchronous execution through [`CmdRunner`]

pub mod command;
pub mod env;
pub mod error;
pub mod fake;
pub mod launcher;
pub mod logger;
pub mod process;
pub mod result;
pub mod runner;
pub mod streams;

pub use command::{ByteSink, ByteSource, CommandSpec};
pub use env::{EnvironmentMerger, KeyComparison, Platform, ResolvedEnvironment};
pub use error::{ErrorKind, RunnerError};
pub use fake::{FakeCmdRunner, RecordedCommand};
pub use launcher::ProcessLauncher;
pub use logger::{Logger, MemoryLogger, NullLogger, TracingLogger};
pub use process::ProcessHandle;
pub use result::{CommandResult, ResultReporter, UNKNOWN_EXIT_STATUS};
pub use runner::{CmdRunner, ExecCmdRunner};
pub use streams::{SharedBuffer, StreamBinder};

/// Result type for command runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
