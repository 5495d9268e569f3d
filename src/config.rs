//! Configuration management for duolog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::Verbosity;
use crate::platform::OsFamily;

/// Log file path prefixes for the two OS families
///
/// The resolved file is `<prefix><YYYY>.log`. Prefixes are joined by plain
/// string concatenation and are not validated until a write is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Logfile {
    /// Prefix used on Windows hosts (e.g. `C:\MyApp\logs\app-`)
    pub win: String,
    /// Prefix used on every other host (e.g. `/var/log/myapp/app-`)
    pub nix: String,
}

impl Logfile {
    /// Create a new logfile configuration
    pub fn new(win: impl Into<String>, nix: impl Into<String>) -> Self {
        Self {
            win: win.into(),
            nix: nix.into(),
        }
    }

    /// Get the path prefix for an OS family
    pub fn prefix_for(&self, family: OsFamily) -> &str {
        match family {
            OsFamily::Windows => &self.win,
            OsFamily::Unix => &self.nix,
        }
    }

    /// Compose the log file path for a family and year
    pub fn resolve(&self, family: OsFamily, year: i32) -> String {
        year_file_path(self.prefix_for(family), year)
    }
}

impl Default for Logfile {
    fn default() -> Self {
        Self {
            win: default_win_prefix(),
            nix: default_nix_prefix(),
        }
    }
}

/// `<prefix><YYYY>.log`
pub(crate) fn year_file_path(prefix: &str, year: i32) -> String {
    format!("{}{:04}.log", prefix, year)
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Console verbosity: -1 quiet, 0 errors and forced info, 1 adds warnings, 2+ everything
    #[serde(default = "default_verbosity")]
    pub verbosity: Verbosity,

    /// Number of yearly log files to keep, current year included (0 disables pruning)
    #[serde(default)]
    pub retention_years: u32,

    /// Log file prefixes
    #[serde(default)]
    pub logfile: Logfile,
}

fn default_verbosity() -> Verbosity {
    Verbosity::new(1)
}

fn default_win_prefix() -> String {
    "C:\\duolog\\logs\\duolog-".to_string()
}

fn default_nix_prefix() -> String {
    format!("{}/duolog-", logs_dir().display())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: default_verbosity(),
            retention_years: 0,
            logfile: Logfile::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Apply a verbosity override such as the `DUOLOG_VERBOSITY` variable
    ///
    /// Values that do not parse as an integer are ignored.
    pub fn apply_verbosity_override(&mut self, value: Option<&str>) {
        if let Some(v) = value.and_then(|v| v.trim().parse::<i32>().ok()) {
            self.verbosity = Verbosity::new(v);
        }
    }
}

/// Get the base configuration directory (~/.duolog)
/// Falls back to ./.duolog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".duolog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".duolog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the default logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure the config and default logs directories exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    std::fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verbosity, Verbosity::new(1));
        assert_eq!(config.retention_years, 0);
        assert!(config.logfile.nix.ends_with("duolog-"));
        assert!(config.logfile.win.starts_with("C:\\"));
    }

    #[test]
    fn test_logfile_resolve() {
        let logfile = Logfile::new("C:\\MyApp\\logs", "var/log/myapp/logs");
        assert_eq!(
            logfile.resolve(OsFamily::Windows, 2024),
            "C:\\MyApp\\logs2024.log"
        );
        assert_eq!(
            logfile.resolve(OsFamily::Unix, 2024),
            "var/log/myapp/logs2024.log"
        );
    }

    #[test]
    fn test_logfile_resolve_is_plain_concatenation() {
        let logfile = Logfile::new("", "/tmp//x/");
        assert_eq!(logfile.resolve(OsFamily::Unix, 1999), "/tmp//x/1999.log");
        assert_eq!(logfile.resolve(OsFamily::Windows, 1999), "1999.log");
    }

    #[test]
    fn test_config_parse_partial() {
        let parsed: Config = toml::from_str("verbosity = -1\n").unwrap();
        assert_eq!(parsed.verbosity, Verbosity::QUIET);
        assert_eq!(parsed.logfile, Logfile::default());
    }

    #[test]
    fn test_config_parse_full() {
        let toml_str = r#"
            verbosity = 3
            retention_years = 2

            [logfile]
            win = 'C:\app\logs\app-'
            nix = "/var/log/app/app-"
        "#;
        let parsed: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.verbosity, Verbosity::new(3));
        assert_eq!(parsed.retention_years, 2);
        assert_eq!(parsed.logfile.win, "C:\\app\\logs\\app-");
        assert_eq!(parsed.logfile.nix, "/var/log/app/app-");
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.verbosity = Verbosity::new(2);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.verbosity, config.verbosity);
        assert_eq!(parsed.logfile, config.logfile);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "verbosity = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.verbosity, Verbosity::new(0));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_invalid_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "verbosity = \"loud\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_verbosity_override() {
        let mut config = Config::default();
        config.apply_verbosity_override(Some(" -1 "));
        assert_eq!(config.verbosity, Verbosity::QUIET);

        config.apply_verbosity_override(Some("loud"));
        assert_eq!(config.verbosity, Verbosity::QUIET);

        config.apply_verbosity_override(None);
        assert_eq!(config.verbosity, Verbosity::QUIET);
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".duolog"));
    }
}
