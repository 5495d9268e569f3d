//! duolog - leveled console-and-file logger
//!
//! Messages are printed to the console with level-coded colors, gated by a
//! verbosity setting, and always appended as plain text to a per-year log file
//! whose path prefix depends on the host OS family.

pub mod config;
pub mod logging;
pub mod platform;

pub use config::{Config, Logfile};
pub use logging::{Level, Logger, Verbosity};
pub use platform::OsFamily;
