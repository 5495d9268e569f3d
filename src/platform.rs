//! Host operating system family detection

/// Coarse platform discriminant used to pick a log path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Windows-like hosts
    Windows,
    /// Everything else (Linux, macOS, BSDs)
    Unix,
}

impl OsFamily {
    /// Family of the host this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }
}

impl Default for OsFamily {
    fn default() -> Self {
        Self::current()
    }
}
