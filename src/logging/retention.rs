//! Log file retention management
//!
//! Handles cleanup of yearly log files that fall outside the retention window.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Split a path prefix into the directory to scan and the file name prefix
fn split_prefix(prefix: &str) -> (PathBuf, String) {
    if prefix.ends_with('/') || prefix.ends_with('\\') {
        return (PathBuf::from(prefix), String::new());
    }

    let path = Path::new(prefix);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, name)
}

/// Extract the year from `<name_prefix><YYYY>.log`
fn year_of(file_name: &str, name_prefix: &str) -> Option<i32> {
    let year = file_name
        .strip_prefix(name_prefix)?
        .strip_suffix(".log")?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}

/// Delete yearly log files for `prefix` older than the retention window
///
/// `keep_years` counts the current year, so `1` keeps only the current file.
/// `0` disables pruning, and so does a window too large to express as a year.
/// Files that do not match `<prefix><YYYY>.log` are left alone.
///
/// Returns the number of files deleted.
pub fn prune_old_years(prefix: &str, keep_years: u32, current_year: i32) -> Result<usize> {
    if keep_years == 0 {
        return Ok(0);
    }

    let (dir, name_prefix) = split_prefix(prefix);
    if !dir.exists() {
        return Ok(0);
    }

    // A span too large for i32 keeps every file
    let Some(oldest_kept) = i32::try_from(keep_years)
        .ok()
        .and_then(|keep| current_year.checked_sub(keep))
        .and_then(|year| year.checked_add(1))
    else {
        return Ok(0);
    };
    let mut deleted_count = 0;

    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(year) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| year_of(n, &name_prefix))
        else {
            continue;
        };

        if year < oldest_kept {
            match fs::remove_file(&path) {
                Ok(()) => deleted_count += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove old log file")
                }
            }
        }
    }

    Ok(deleted_count)
}
