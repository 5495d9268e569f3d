//! Leveled entry points fanning out to the console and the log file

use std::path::PathBuf;
use std::sync::Arc;

use super::console::{Console, StdConsole, Stream};
use super::file_writer::{terminate_on_open_failure, BatchWriter, FileSink, OpenFailureHook};
use super::level::{Level, Verbosity};
use super::style::{default_renderer, Style, StyleRenderer};
use super::timestamp::{format_line, Clock, SystemClock};
use crate::config::Logfile;
use crate::platform::OsFamily;

/// Leveled console-and-file logger
///
/// Every call appends plain `[TAG] message` lines to `<prefix><YYYY>.log`
/// regardless of verbosity. The styled console copy is written synchronously,
/// only when the verbosity gate for the level passes.
///
/// ```no_run
/// use duolog::{Logfile, Logger};
///
/// let logger = Logger::new(1, Logfile::new("C:\\MyApp\\logs\\app-", "/var/log/myapp/app-"));
/// logger.force_info(["service started"]);
/// logger.warn(["disk low", "cache disabled"]);
/// ```
pub struct Logger {
    verbosity: Verbosity,
    logfile: Logfile,
    os_family: OsFamily,
    stdout_renderer: Arc<dyn StyleRenderer>,
    stderr_renderer: Arc<dyn StyleRenderer>,
    console: Arc<dyn Console>,
    clock: Arc<dyn Clock>,
    sink: FileSink,
}

impl Logger {
    /// Create a logger writing to the process console and the host's log file
    pub fn new(verbosity: impl Into<Verbosity>, logfile: Logfile) -> Self {
        Self::builder(verbosity, logfile).build()
    }

    /// Start a builder to override the console, clock, styling or OS family
    pub fn builder(verbosity: impl Into<Verbosity>, logfile: Logfile) -> LoggerBuilder {
        LoggerBuilder {
            verbosity: verbosity.into(),
            logfile,
            os_family: None,
            stdout_renderer: None,
            stderr_renderer: None,
            console: None,
            clock: None,
            on_open_failure: None,
        }
    }

    /// Log information, shown on the console at verbosity 2 and above
    pub fn info<I, S>(&self, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(Level::Info, msgs);
    }

    /// Log information shown on the console unless the logger is quiet
    pub fn force_info<I, S>(&self, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(Level::ForceInfo, msgs);
    }

    /// Log a warning, shown on the console at verbosity 1 and above
    pub fn warn<I, S>(&self, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(Level::Warn, msgs);
    }

    /// Log an error to stderr unless the logger is quiet
    pub fn err<I, S>(&self, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(Level::Error, msgs);
    }

    /// Log at an explicit level
    pub fn log<I, S>(&self, level: Level, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch(level, msgs);
    }

    fn dispatch<I, S>(&self, level: Level, msgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let msgs: Vec<S> = msgs.into_iter().collect();
        if msgs.is_empty() {
            return;
        }

        let plain = msgs.iter().map(|m| level.plain(m.as_ref())).collect();
        self.sink.submit(plain);

        if !self.verbosity.allows(level) {
            return;
        }

        let stream = level.stream();
        let renderer = match stream {
            Stream::Stdout => &self.stdout_renderer,
            Stream::Stderr => &self.stderr_renderer,
        };
        let tag = renderer.render(&format!("[{}]", level.tag()), level.tag_style());
        for msg in &msgs {
            let body = renderer.render(msg.as_ref(), Style::Message);
            let line = format_line(&self.clock.now(), &format!("{} {}", tag, body));
            self.console.write_line(stream, &line);
        }
    }

    /// Block until every batch logged so far has reached the file sink
    ///
    /// Waits on the sink thread, so it must not be called from an open-failure hook.
    pub fn flush(&self) {
        self.sink.flush();
    }

    pub fn os_family(&self) -> OsFamily {
        self.os_family
    }

    /// Path the next batch will be appended to
    pub fn current_log_path(&self) -> PathBuf {
        self.sink.current_path()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("verbosity", &self.verbosity)
            .field("logfile", &self.logfile)
            .field("os_family", &self.os_family)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    verbosity: Verbosity,
    logfile: Logfile,
    os_family: Option<OsFamily>,
    stdout_renderer: Option<Arc<dyn StyleRenderer>>,
    stderr_renderer: Option<Arc<dyn StyleRenderer>>,
    console: Option<Arc<dyn Console>>,
    clock: Option<Arc<dyn Clock>>,
    on_open_failure: Option<OpenFailureHook>,
}

impl LoggerBuilder {
    /// Override the detected OS family
    pub fn os_family(mut self, family: OsFamily) -> Self {
        self.os_family = Some(family);
        self
    }

    /// Use one renderer for both console streams
    pub fn renderer(mut self, renderer: impl StyleRenderer + 'static) -> Self {
        let renderer: Arc<dyn StyleRenderer> = Arc::new(renderer);
        self.stdout_renderer = Some(Arc::clone(&renderer));
        self.stderr_renderer = Some(renderer);
        self
    }

    /// Override the renderer for a single console stream
    pub fn stream_renderer(
        mut self,
        stream: Stream,
        renderer: impl StyleRenderer + 'static,
    ) -> Self {
        let renderer: Arc<dyn StyleRenderer> = Arc::new(renderer);
        match stream {
            Stream::Stdout => self.stdout_renderer = Some(renderer),
            Stream::Stderr => self.stderr_renderer = Some(renderer),
        }
        self
    }

    pub fn console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the default terminate-the-process reaction to open failures
    pub fn on_open_failure(mut self, hook: OpenFailureHook) -> Self {
        self.on_open_failure = Some(hook);
        self
    }

    /// Resolve collaborators and start the file sink thread
    pub fn build(self) -> Logger {
        let os_family = self.os_family.unwrap_or_else(OsFamily::current);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let hook = self
            .on_open_failure
            .unwrap_or_else(terminate_on_open_failure);

        let prefix = self.logfile.prefix_for(os_family).to_string();
        let sink = FileSink::spawn(BatchWriter::new(prefix, Arc::clone(&clock), hook));

        Logger {
            verbosity: self.verbosity,
            logfile: self.logfile,
            os_family,
            stdout_renderer: self
                .stdout_renderer
                .unwrap_or_else(|| default_renderer(Stream::Stdout)),
            stderr_renderer: self
                .stderr_renderer
                .unwrap_or_else(|| default_renderer(Stream::Stderr)),
            console: self.console.unwrap_or_else(|| Arc::new(StdConsole)),
            clock,
            sink,
        }
    }
}
