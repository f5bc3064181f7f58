//! Command results and completion reporting.

use crate::error::RunnerError;
use crate::streams::Captured;
use std::io;
use std::process::ExitStatus;

/// Exit status reported when the process never produced a native exit code,
/// for example when it was killed by a signal or was never started.
///
/// This is not a real exit code and must not be interpreted as one.
pub const UNKNOWN_EXIT_STATUS: i32 = -1;

/// The terminal result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Captured standard output. Empty when stdout went to a caller sink.
    pub stdout: String,

    /// Captured standard error. Empty when stderr went to a caller sink.
    pub stderr: String,

    /// Native exit code, or [`UNKNOWN_EXIT_STATUS`].
    pub exit_status: i32,

    /// Set for launch failures, non-zero exits and I/O failures.
    pub error: Option<RunnerError>,
}

impl CommandResult {
    /// A result for a command that failed before producing any output.
    pub fn from_error(error: RunnerError) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_status: UNKNOWN_EXIT_STATUS,
            error: Some(error),
        }
    }

    /// A successful result with the given stdout.
    pub fn success_with_output(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_status: 0,
            error: None,
        }
    }

    /// Check if the command ran and exited with status 0.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, so callers can use `?`.
    pub fn into_result(self) -> crate::Result<Self> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

/// Normalizes raw process completion into a [`CommandResult`].
pub struct ResultReporter;

impl ResultReporter {
    /// Build the result for a launched process.
    ///
    /// A non-zero exit takes precedence over stream failures. Any stream or
    /// wait failure otherwise yields an I/O failure with
    /// [`UNKNOWN_EXIT_STATUS`].
    pub fn report(
        command_line: &str,
        status: io::Result<ExitStatus>,
        captured: Captured,
    ) -> CommandResult {
        let stdout = lossy(&captured.stdout);
        let stderr = lossy(&captured.stderr);

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                return CommandResult {
                    stdout,
                    stderr,
                    exit_status: UNKNOWN_EXIT_STATUS,
                    error: Some(RunnerError::io_failure(
                        command_line,
                        format!("waiting for process: {}", e),
                    )),
                };
            }
        };

        if !status.success() {
            let error = RunnerError::NonZeroExit {
                command: command_line.to_string(),
                stdout: stdout.clone(),
                stderr: stderr.clone(),
                status: describe(&status),
            };
            return CommandResult {
                stdout,
                stderr,
                exit_status: status.code().unwrap_or(UNKNOWN_EXIT_STATUS),
                error: Some(error),
            };
        }

        let stream_error = [
            ("stdout", captured.stdout.as_ref().err()),
            ("stderr", captured.stderr.as_ref().err()),
            ("stdin", captured.stdin.as_ref().err()),
        ]
        .into_iter()
        .find_map(|(stream, err)| err.map(|e| format!("{}: {}", stream, e)));

        match stream_error {
            Some(message) => CommandResult {
                stdout,
                stderr,
                exit_status: UNKNOWN_EXIT_STATUS,
                error: Some(RunnerError::io_failure(command_line, message)),
            },
            None => CommandResult {
                stdout,
                stderr,
                exit_status: 0,
                error: None,
            },
        }
    }
}

fn lossy(bytes: &io::Result<Vec<u8>>) -> String {
    match bytes {
        Ok(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Err(_) => String::new(),
    }
}

/// Native description of a non-successful exit status.
fn describe(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal: {}", signal);
        }
    }

    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }

    fn captured(stdout: &str, stderr: &str) -> Captured {
        Captured {
            stdout: Ok(stdout.as_bytes().to_vec()),
            stderr: Ok(stderr.as_bytes().to_vec()),
            stdin: Ok(()),
        }
    }

    #[test]
    fn test_report_success() {
        let result = ResultReporter::report("echo hi", Ok(exit_status(0)), captured("hi\n", ""));
        assert!(result.success());
        assert_eq!(result.exit_status, 0);
        assert_eq!(result.stdout, "hi\n");
    }

    #[test]
    fn test_report_non_zero_exit() {
        let result = ResultReporter::report(
            "false second arg",
            Ok(exit_status(1)),
            captured("", ""),
        );
        assert_eq!(result.exit_status, 1);
        let error = result.error.unwrap();
        assert_eq!(error.kind(), ErrorKind::NonZeroExit);
        assert_eq!(
            error.to_string(),
            "Running command: 'false second arg', stdout: '', stderr: '': exit status 1"
        );
    }

    #[test]
    fn test_report_embeds_output_in_error() {
        let result = ResultReporter::report("sh", Ok(exit_status(14)), captured("out", "err"));
        assert_eq!(result.exit_status, 14);
        assert!(result
            .error
            .unwrap()
            .to_string()
            .contains("stdout: 'out', stderr: 'err'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_report_signal() {
        use std::os::unix::process::ExitStatusExt;
        let result = ResultReporter::report("sleep", Ok(ExitStatus::from_raw(9)), captured("", ""));
        assert_eq!(result.exit_status, UNKNOWN_EXIT_STATUS);
        assert!(result.error.unwrap().to_string().ends_with("signal: 9"));
    }

    #[test]
    fn test_report_wait_failure() {
        let result = ResultReporter::report(
            "cat",
            Err(io::Error::new(io::ErrorKind::Other, "boom")),
            captured("", ""),
        );
        assert_eq!(result.exit_status, UNKNOWN_EXIT_STATUS);
        assert_eq!(result.error.unwrap().kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_report_stream_failure() {
        let captured = Captured {
            stdout: Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe")),
            stderr: Ok(Vec::new()),
            stdin: Ok(()),
        };
        let result = ResultReporter::report("cat", Ok(exit_status(0)), captured);
        assert_eq!(result.exit_status, UNKNOWN_EXIT_STATUS);
        let error = result.error.unwrap();
        assert_eq!(error.kind(), ErrorKind::IoFailure);
        assert!(error.to_string().contains("stdout: pipe"));
    }

    #[test]
    fn test_into_result() {
        assert!(CommandResult::success_with_output("ok").into_result().is_ok());
        let failed = CommandResult::from_error(RunnerError::launch_failure("x", "denied"));
        assert_eq!(failed.exit_status, UNKNOWN_EXIT_STATUS);
        assert!(failed.into_result().is_err());
    }
}
