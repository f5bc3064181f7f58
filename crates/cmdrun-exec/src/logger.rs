//! Logger collaborator used by the command runner.

use cmdrun_core::config::LogLevel;
use parking_lot::Mutex;

/// Receives command lines and (truncated) command output.
///
/// Implementations must be safe to call from concurrent invocations.
pub trait Logger: Send + Sync {
    /// Log at debug level.
    fn debug(&self, tag: &str, message: &str);

    /// Log at info level.
    fn info(&self, tag: &str, message: &str);
}

/// Forwards to `tracing`, with the tag as a structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, tag: &str, message: &str) {
        tracing::debug!(tag, "{}", message);
    }

    fn info(&self, tag: &str, message: &str) {
        tracing::info!(tag, "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _tag: &str, _message: &str) {}

    fn info(&self, _tag: &str, _message: &str) {}
}

/// A recorded log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
}

/// Records every call, for tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, in call order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Number of `debug` calls.
    pub fn debug_call_count(&self) -> usize {
        self.count(LogLevel::Debug)
    }

    /// Number of `info` calls.
    pub fn info_call_count(&self) -> usize {
        self.count(LogLevel::Info)
    }

    fn count(&self, level: LogLevel) -> usize {
        self.entries.lock().iter().filter(|e| e.level == level).count()
    }

    fn record(&self, level: LogLevel, tag: &str, message: &str) {
        self.entries.lock().push(LogEntry {
            level,
            tag: tag.to_string(),
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, tag: &str, message: &str) {
        self.record(LogLevel::Debug, tag, message);
    }

    fn info(&self, tag: &str, message: &str) {
        self.record(LogLevel::Info, tag, message);
    }
}

/// Truncate `text` to at most `limit` bytes on a char boundary.
pub(crate) fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes truncated)", &text[..end], text.len() - end)
}
