//! Console sink

use std::io::Write;
use std::sync::Mutex;

/// Console stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Line-oriented console output
pub trait Console: Send + Sync {
    /// Write one line; failures are swallowed
    fn write_line(&self, stream: Stream, line: &str);
}

/// Process stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&self, stream: Stream, line: &str) {
        let _ = match stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

/// Console that records lines in memory
///
/// Useful for testing or when output should be inspected instead of printed.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in write order
    pub fn lines(&self) -> Vec<(Stream, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Recorded lines for one stream
    pub fn stream_lines(&self, stream: Stream) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Console for MemoryConsole {
    fn write_line(&self, stream: Stream, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((stream, line.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_records_in_order() {
        let console = MemoryConsole::new();
        assert!(console.is_empty());

        console.write_line(Stream::Stdout, "one");
        console.write_line(Stream::Stderr, "two");
        console.write_line(Stream::Stdout, "three");

        assert_eq!(console.len(), 3);
        assert_eq!(console.stream_lines(Stream::Stdout), vec!["one", "three"]);
        assert_eq!(console.stream_lines(Stream::Stderr), vec!["two"]);
    }

    #[test]
    fn test_std_console_does_not_panic() {
        let console = StdConsole;
        console.write_line(Stream::Stdout, "stdout line");
        console.write_line(Stream::Stderr, "stderr line");
    }
}
