//! Command runner error types.

use thiserror::Error;

/// Errors produced while launching or completing a command.
///
/// Native errors are captured as text so a finished result can be cloned and
/// handed to any number of readers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    /// The program could not be located on the search path or filesystem.
    #[error("Running command: '{command}': executable file not found: {program}")]
    NotFound { command: String, program: String },

    /// The OS refused to start the process.
    #[error("Running command: '{command}': failed to start: {message}")]
    LaunchFailure { command: String, message: String },

    /// The process ran to completion with a non-zero status.
    #[error("Running command: '{command}', stdout: '{stdout}', stderr: '{stderr}': {status}")]
    NonZeroExit {
        command: String,
        stdout: String,
        stderr: String,
        status: String,
    },

    /// Draining a stream or waiting on the process failed after launch.
    #[error("Running command: '{command}': I/O failure: {message}")]
    IoFailure { command: String, message: String },

    /// The requested launch cannot be expressed on this platform.
    #[error("Unsupported on this platform: {0}")]
    PlatformUnsupported(String),
}

/// Classification of a [`RunnerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The program was not found.
    NotFound,
    /// The OS refused to start the process.
    LaunchFailure,
    /// The process exited unsuccessfully.
    NonZeroExit,
    /// A stream or wait failed after launch.
    IoFailure,
    /// The launch cannot be expressed on this platform.
    PlatformUnsupported,
}

impl RunnerError {
    /// Create a new launch failure error.
    pub fn launch_failure(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LaunchFailure {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O failure error.
    pub fn io_failure(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IoFailure {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::LaunchFailure { .. } => ErrorKind::LaunchFailure,
            Self::NonZeroExit { .. } => ErrorKind::NonZeroExit,
            Self::IoFailure { .. } => ErrorKind::IoFailure,
            Self::PlatformUnsupported(_) => ErrorKind::PlatformUnsupported,
        }
    }

    /// Check if this error is a caller configuration error that must not be
    /// handled as a runtime condition.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Self::PlatformUnsupported(_))
    }
}
