//! Year-stamped file sink
//!
//! Batches are handed to a dedicated writer thread through a channel so callers
//! never wait on file I/O. Each batch reopens `<prefix><YYYY>.log` in append mode
//! and drops the handle when the batch is done.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Datelike;
use thiserror::Error;
use tokio::sync::mpsc;

use super::timestamp::{format_line, Clock};
use crate::config::year_file_path;

/// Errors raised by the file sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open log file {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Called when the log file cannot be opened
pub type OpenFailureHook = Arc<dyn Fn(&SinkError) + Send + Sync>;

/// Default hook: report the error and terminate the process with status 1
pub fn terminate_on_open_failure() -> OpenFailureHook {
    Arc::new(|err: &SinkError| {
        tracing::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    })
}

/// Writes one batch at a time to the current year's file
pub struct BatchWriter {
    prefix: String,
    clock: Arc<dyn Clock>,
    on_open_failure: OpenFailureHook,
}

impl BatchWriter {
    pub fn new(
        prefix: impl Into<String>,
        clock: Arc<dyn Clock>,
        on_open_failure: OpenFailureHook,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            clock,
            on_open_failure,
        }
    }

    /// Path of the file the next batch goes to
    pub fn current_path(&self) -> PathBuf {
        PathBuf::from(year_file_path(&self.prefix, self.clock.now().year()))
    }

    /// Append tagged lines, each with its own timestamp
    ///
    /// A failed write does not stop the remaining lines.
    pub fn write_batch(&self, lines: &[String]) {
        let path = self.current_path();
        let mut file = match open_append(&path) {
            Ok(file) => file,
            Err(source) => {
                (self.on_open_failure)(&SinkError::Open { path, source });
                return;
            }
        };

        for line in lines {
            let formatted = format!("{}\n", format_line(&self.clock.now(), line));
            if let Err(e) = file.write_all(formatted.as_bytes()) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write log line");
            }
        }
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}

enum SinkCommand {
    Write(Vec<String>),
    Flush(std::sync::mpsc::SyncSender<()>),
}

/// Handle to the file sink thread
///
/// Dropping the handle closes the channel; the thread finishes queued batches
/// and exits, but nothing waits for it.
pub struct FileSink {
    tx: mpsc::UnboundedSender<SinkCommand>,
    writer: Arc<BatchWriter>,
}

impl FileSink {
    /// Start the writer thread
    ///
    /// If the thread cannot be started, batches are written on the caller's thread.
    pub fn spawn(writer: BatchWriter) -> Self {
        let writer = Arc::new(writer);
        let (tx, rx) = mpsc::unbounded_channel();

        let thread_writer = Arc::clone(&writer);
        let spawned = std::thread::Builder::new()
            .name("duolog-file-sink".to_string())
            .spawn(move || run(rx, thread_writer));
        if let Err(e) = spawned {
            tracing::error!(error = %e, "Failed to start file sink thread, writing inline");
        }

        Self { tx, writer }
    }

    /// Queue a batch without waiting for it to be written
    pub fn submit(&self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        if let Err(mpsc::error::SendError(SinkCommand::Write(lines))) =
            self.tx.send(SinkCommand::Write(lines))
        {
            self.writer.write_batch(&lines);
        }
    }

    /// Block until every batch submitted so far has been handled
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = std::sync::mpsc::sync_channel(1);
        if self.tx.send(SinkCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    pub fn current_path(&self) -> PathBuf {
        self.writer.current_path()
    }
}

fn run(mut rx: mpsc::UnboundedReceiver<SinkCommand>, writer: Arc<BatchWriter>) {
    tracing::debug!(prefix = %writer.prefix, "File sink started");
    while let Some(command) = rx.blocking_recv() {
        match command {
            SinkCommand::Write(lines) => writer.write_batch(&lines),
            SinkCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    tracing::debug!(prefix = %writer.prefix, "File sink stopped");
}
