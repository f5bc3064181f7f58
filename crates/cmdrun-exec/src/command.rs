//! Command specification.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWrite};

/// A byte source the process reads its stdin from.
pub type ByteSource = Box<dyn AsyncRead + Send + Unpin>;

/// A byte sink the process output is streamed to.
pub type ByteSink = Box<dyn AsyncWrite + Send + Unpin>;

/// Everything needed to launch one process.
///
/// A spec is moved into the runner, so it cannot change once launched.
#[derive(Default)]
pub struct CommandSpec {
    /// Program name or path.
    pub name: String,

    /// Arguments, in order.
    pub args: Vec<String>,

    /// Working directory. Defaults to the current directory of this process.
    pub working_dir: Option<PathBuf>,

    /// Explicit environment variables, applied over the ambient environment.
    pub env: HashMap<String, String>,

    /// Launch with only `env`, without inheriting the ambient environment.
    pub use_isolated_env: bool,

    /// Source for stdin. The process gets an empty stdin when absent.
    pub stdin: Option<ByteSource>,

    /// Sink for stdout. Captured into the result when absent.
    pub stdout: Option<ByteSink>,

    /// Sink for stderr. Captured into the result when absent.
    pub stderr: Option<ByteSink>,
}

impl CommandSpec {
    /// Create a spec for the given program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set multiple environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Exclude the ambient environment.
    pub fn isolated_env(mut self, isolated: bool) -> Self {
        self.use_isolated_env = isolated;
        self
    }

    /// Read stdin from the given source.
    pub fn stdin(mut self, source: impl AsyncRead + Send + Unpin + 'static) -> Self {
        self.stdin = Some(Box::new(source));
        self
    }

    /// Stream stdout to the given sink.
    pub fn stdout(mut self, sink: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    /// Stream stderr to the given sink.
    pub fn stderr(mut self, sink: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// The program followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .field("env", &self.env)
            .field("use_isolated_env", &self.use_isolated_env)
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish()
    }
}
