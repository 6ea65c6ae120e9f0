//! Logging setup and the persistent rejection log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second init (tests, embedding callers) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Append-only `error.log` inside a log directory. Never truncated.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    dir: PathBuf,
}

impl ErrorLog {
    pub const FILE_NAME: &'static str = "error.log";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::FILE_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Appends one line, creating the directory and file if needed.
    pub fn append(&self, message: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())?;
        writeln!(file, "{}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_without_truncating() {
        let tmp = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(tmp.path().join("logs"));

        log.append("first").unwrap();
        log.append("second").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing("debug");
        init_tracing("info");
    }
}
