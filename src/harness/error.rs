//! Harness error types

use std::path::PathBuf;

use super::launcher::LaunchError;

/// Errors that abort the whole harness rather than a single target.
///
/// Per-target problems (a missing script, a timeout) never surface here;
/// they are captured in that target's [`RunOutcome`](super::RunOutcome).
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("{0} does not look like a project root (no makefile found)")]
    BadRoot(PathBuf),

    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),
}
