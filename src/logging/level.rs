//! Severity levels and the verbosity gate

use serde::{Deserialize, Serialize};

use super::console::Stream;
use super::style::Style;

/// Entry point severity
///
/// `ForceInfo` shares the `INFO` tag but reaches the console unless the logger is quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    ForceInfo,
    Warn,
    Error,
}

impl Level {
    /// All entry point levels
    pub const ALL: [Level; 4] = [Level::Info, Level::ForceInfo, Level::Warn, Level::Error];

    /// Tag written in front of every message
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Info | Level::ForceInfo => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Verbosity must be strictly greater than this for console output
    pub fn console_threshold(&self) -> i32 {
        match self {
            Level::Info => 1,
            Level::Warn => 0,
            Level::ForceInfo | Level::Error => -1,
        }
    }

    /// Console stream this level is written to
    pub fn stream(&self) -> Stream {
        match self {
            Level::Error => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// Style used to render the tag
    pub fn tag_style(&self) -> Style {
        match self {
            Level::Info | Level::ForceInfo => Style::InfoTag,
            Level::Warn => Style::WarnTag,
            Level::Error => Style::ErrorTag,
        }
    }

    /// Undecorated `[TAG] message` text handed to the file sink
    pub fn plain(&self, message: &str) -> String {
        format!("[{}] {}", self.tag(), message)
    }
}

/// Console verbosity
///
/// * `-1` and below: quiet, nothing reaches the console
/// * `0`: errors and forced info
/// * `1`: adds warnings
/// * `2` and above: everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(i32);

impl Verbosity {
    pub const QUIET: Verbosity = Verbosity(-1);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Whether a level passes the console gate
    pub fn allows(&self, level: Level) -> bool {
        self.0 > level.console_threshold()
    }
}

impl From<i32> for Verbosity {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tags() {
        assert_eq!(Level::Info.tag(), "INFO");
        assert_eq!(Level::ForceInfo.tag(), "INFO");
        assert_eq!(Level::Warn.tag(), "WARN");
        assert_eq!(Level::Error.tag(), "ERROR");
    }

    #[test]
    fn test_only_error_goes_to_stderr() {
        for level in Level::ALL {
            let expected = if level == Level::Error {
                Stream::Stderr
            } else {
                Stream::Stdout
            };
            assert_eq!(level.stream(), expected);
        }
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(Level::Warn.plain("disk low"), "[WARN] disk low");
        assert_eq!(Level::ForceInfo.plain(""), "[INFO] ");
    }

    #[test]
    fn test_gate_table() {
        // (verbosity, info, force_info, warn, err)
        let table = [
            (-2, false, false, false, false),
            (-1, false, false, false, false),
            (0, false, true, false, true),
            (1, false, true, true, true),
            (2, true, true, true, true),
            (3, true, true, true, true),
        ];

        for (v, info, force_info, warn, err) in table {
            let verbosity = Verbosity::new(v);
            assert_eq!(verbosity.allows(Level::Info), info, "info at {}", v);
            assert_eq!(verbosity.allows(Level::ForceInfo), force_info, "force_info at {}", v);
            assert_eq!(verbosity.allows(Level::Warn), warn, "warn at {}", v);
            assert_eq!(verbosity.allows(Level::Error), err, "err at {}", v);
        }
    }
}
