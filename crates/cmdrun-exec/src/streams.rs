//! Standard stream binding and draining.

use crate::command::{ByteSink, ByteSource};
use parking_lot::Mutex;
use std::io;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::warn;

/// Resolved endpoints for a process's standard streams.
pub struct StreamBinder {
    stdin: Option<ByteSource>,
    stdout: Option<ByteSink>,
    stderr: Option<ByteSink>,
}

impl StreamBinder {
    /// Bind the given caller endpoints. Absent sinks are captured in memory.
    pub fn new(
        stdin: Option<ByteSource>,
        stdout: Option<ByteSink>,
        stderr: Option<ByteSink>,
    ) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
        }
    }

    /// Stdio configuration for the child's stdin.
    ///
    /// The child never inherits this process's stdin.
    pub fn stdin_stdio(&self) -> Stdio {
        if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        }
    }

    /// Take the child's pipes and start one task per stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(self, child: &mut Child) -> DrainTasks {
        let stdin = match (self.stdin, child.stdin.take()) {
            (Some(source), Some(pipe)) => Some(tokio::spawn(feed(source, pipe))),
            _ => None,
        };

        let stdout = tokio::spawn(drain(child.stdout.take(), self.stdout));
        let stderr = tokio::spawn(drain(child.stderr.take(), self.stderr));

        DrainTasks {
            stdin,
            stdout,
            stderr,
        }
    }
}

/// Bytes captured from a finished process.
#[derive(Debug)]
pub struct Captured {
    pub stdout: io::Result<Vec<u8>>,
    pub stderr: io::Result<Vec<u8>>,
    pub stdin: io::Result<()>,
}

/// Running stream tasks of one process.
pub struct DrainTasks {
    stdin: Option<JoinHandle<io::Result<()>>>,
    stdout: JoinHandle<io::Result<Vec<u8>>>,
    stderr: JoinHandle<io::Result<Vec<u8>>>,
}

impl DrainTasks {
    /// Wait for every stream task to finish.
    pub async fn finish(self) -> Captured {
        let (stdout, stderr) = tokio::join!(joined(self.stdout), joined(self.stderr));
        let stdin = match self.stdin {
            Some(task) => joined(task).await,
            None => Ok(()),
        };

        Captured {
            stdout,
            stderr,
            stdin,
        }
    }
}

async fn joined<T>(task: JoinHandle<io::Result<T>>) -> io::Result<T> {
    task.await
        .unwrap_or_else(|e| Err(io::Error::new(io::ErrorKind::Other, e)))
}

/// Read a stream until EOF, into `sink` when given or into memory otherwise.
///
/// Returns the captured bytes, which are empty when a sink was used.
async fn drain(
    reader: Option<impl AsyncRead + Unpin>,
    sink: Option<ByteSink>,
) -> io::Result<Vec<u8>> {
    let Some(mut reader) = reader else {
        return Ok(Vec::new());
    };

    let result = match sink {
        Some(sink) => copy_to_sink(&mut reader, sink).await.map(|_| Vec::new()),
        None => {
            let mut output = Vec::new();
            reader.read_to_end(&mut output).await.map(|_| output)
        }
    };

    if let Err(e) = &result {
        warn!("Error draining stream: {}", e);
    }
    result
}

async fn copy_to_sink(reader: &mut (impl AsyncRead + Unpin), mut sink: ByteSink) -> io::Result<()> {
    tokio::io::copy(reader, &mut sink).await?;
    sink.flush().await
}

/// Copy `source` into the child's stdin, then close it.
///
/// A child that exits or stops reading early is not an error.
async fn feed(mut source: ByteSource, mut pipe: impl AsyncWrite + Unpin) -> io::Result<()> {
    match tokio::io::copy(&mut source, &mut pipe).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        Err(e) => {
            warn!("Error writing stdin: {}", e);
            return Err(e);
        }
    }

    match pipe.shutdown().await {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
        _ => Ok(()),
    }
}

/// A cloneable in-memory sink.
///
/// Hand one clone to a command and read the bytes back from another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the bytes written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.inner.lock().clone()
    }

    /// Bytes written so far, lossily decoded as UTF-8.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }
}

impl AsyncWrite for SharedBuffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.inner.lock().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
