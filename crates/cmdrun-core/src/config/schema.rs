//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main cmdrun configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Command runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command runner configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maximum number of bytes of captured output written to the log per stream.
    #[serde(default = "default_log_output_limit")]
    pub log_output_limit: usize,

    /// Launch commands with only the configured variables.
    #[serde(default)]
    pub isolated_env: bool,

    /// Variables applied to every command launched by the CLI.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory for commands launched by the CLI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

fn default_log_output_limit() -> usize {
    1024
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_output_limit: default_log_output_limit(),
            isolated_env: false,
            env: BTreeMap::new(),
            working_dir: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Emit JSON formatted log lines.
    #[serde(default)]
    pub json: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive usable in a `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}
