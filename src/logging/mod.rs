//! Logging engine for duolog
//!
//! Provides the leveled dispatcher, the console and yearly file sinks, and
//! retention of old yearly log files.

mod console;
mod dispatcher;
mod file_writer;
mod level;
mod retention;
mod style;
mod timestamp;

pub use console::{Console, MemoryConsole, StdConsole, Stream};
pub use dispatcher::{Logger, LoggerBuilder};
pub use file_writer::{terminate_on_open_failure, OpenFailureHook, SinkError};
pub use level::{Level, Verbosity};
pub use retention::prune_old_years;
pub use style::{default_renderer, AnsiRenderer, PlainRenderer, Style, StyleRenderer};
pub use timestamp::{format_line, format_timestamp, Clock, FixedClock, SystemClock};
