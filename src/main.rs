use std::process::ExitCode;

use anyhow::Result;
use chrono::Datelike;

use duolog::config::{self, Config};
use duolog::logging::{prune_old_years, Level, Logger};

const USAGE: &str = "usage: duolog <info|force-info|warn|err> [MESSAGE]...";

fn parse_level(arg: &str) -> Option<Level> {
    match arg {
        "info" => Some(Level::Info),
        "force-info" => Some(Level::ForceInfo),
        "warn" => Some(Level::Warn),
        "err" | "error" => Some(Level::Error),
        _ => None,
    }
}

fn main() -> Result<ExitCode> {
    // Diagnostics about duolog itself go to stderr, separate from logged messages
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "duolog=warn".into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(level) = args.next().as_deref().and_then(parse_level) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };
    let messages: Vec<String> = args.collect();

    // Creates ~/.duolog/logs, the home of the default prefix
    config::ensure_directories()?;

    let mut config = Config::load()?;
    config.apply_verbosity_override(std::env::var("DUOLOG_VERBOSITY").ok().as_deref());

    let logger = Logger::new(config.verbosity, config.logfile.clone());
    tracing::debug!(path = %logger.current_log_path().display(), "Logging to file");

    if config.retention_years > 0 {
        let prefix = config.logfile.prefix_for(logger.os_family());
        match prune_old_years(prefix, config.retention_years, chrono::Local::now().year()) {
            Ok(count) if count > 0 => tracing::info!("Cleaned up {} old log files", count),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to clean up old log files"),
        }
    }

    logger.log(level, &messages);

    // The sink thread is not joined on exit
    logger.flush();

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info"), Some(Level::Info));
        assert_eq!(parse_level("force-info"), Some(Level::ForceInfo));
        assert_eq!(parse_level("warn"), Some(Level::Warn));
        assert_eq!(parse_level("err"), Some(Level::Error));
        assert_eq!(parse_level("error"), Some(Level::Error));
        assert_eq!(parse_level("debug"), None);
    }
}
