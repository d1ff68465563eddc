//! Append-only failure journal
//!
//! One line per failed operation: `<timestamp> - <error message>`. The
//! file and its parent directory are created on first write. A journal
//! write failure is reported through tracing and never escalates.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

use crate::model::format_timestamp;

/// Default journal location, relative to the working directory
pub const DEFAULT_JOURNAL_PATH: &str = "data/failures.log";

/// File collaborator recording every recoverable failure
#[derive(Debug, Clone)]
pub struct FailureJournal {
    path: PathBuf,
}

impl FailureJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Self {
        Self::new(DEFAULT_JOURNAL_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line for a failed operation
    pub fn append(&self, message: &str) {
        let line = format!("{} - {}\n", format_timestamp(Local::now()), message);
        if let Err(err) = self.write_line(&line) {
            warn!("failure journal write failed ({}): {}", self.path.display(), err);
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn append_creates_file_and_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FailureJournal::new(dir.path().join("logs/failures.log"));

        journal.append("division by zero");
        journal.append("storage failure: disk full");

        let contents = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - division by zero"));
        assert!(lines[1].ends_with(" - storage failure: disk full"));
        // timestamped prefix is the fixed-width record key format
        assert_eq!(lines[0].split(" - ").next().unwrap().len(), 14);
    }
}
