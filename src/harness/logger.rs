//! Run artifact persistence
//!
//! When a log directory is configured, each target's transcript is written
//! to `<dir>/<target>.log` and the aggregate summary to `summary.txt` plus
//! a machine-readable `summary.json`. Write failures are reported by the
//! caller as warnings; they never change a run's outcome.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::result::RunOutcome;

/// Writes per-target and aggregate artifacts under one directory.
#[derive(Debug, Clone)]
pub struct RunLogger {
    dir: PathBuf,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    success: bool,
    passed: usize,
    total: usize,
    targets: &'a [RunOutcome],
}

impl RunLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one target's transcript as newline-joined text.
    pub fn persist_transcript(&self, target: &str, transcript: &[String]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{target}.log"));
        fs::write(&path, transcript.join("\n"))?;
        Ok(path)
    }

    /// Write the aggregate summary text, one line per entry.
    pub fn persist_summary(&self, lines: &[String]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join("summary.txt");
        fs::write(&path, lines.join("\n") + "\n")?;
        Ok(path)
    }

    /// Write the machine-readable summary.
    pub fn persist_summary_json(&self, outcomes: &[RunOutcome]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let passed = outcomes.iter().filter(|o| o.outcome.is_pass()).count();
        let summary = SummaryJson {
            success: !outcomes.is_empty() && passed == outcomes.len(),
            passed,
            total: outcomes.len(),
            targets: outcomes,
        };
        let path = self.dir.join("summary.json");
        fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        Ok(path)
    }
}
