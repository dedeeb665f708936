//! Boot-test orchestration
//!
//! Iterates the selected targets in order, runs the launch → monitor →
//! shutdown → persist pipeline for each, and reports the aggregate summary.
//! Targets run strictly one at a time: a child is always reaped before the
//! next launch, so console output from different targets never interleaves
//! and no emulator instance leaks past its run.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::error::HarnessError;
use super::launcher;
use super::lifecycle;
use super::logger::RunLogger;
use super::monitor;
use super::patterns::IndicatorSet;
use super::registry::{ArchDescriptor, ArchRegistry};
use super::result::{Outcome, RunOutcome, SummaryReport};

/// Marker files that identify a usable project root.
const ROOT_MARKERS: &[&str] = &["makefile", "Makefile"];

/// Sequential multi-target boot-test driver.
#[derive(Debug)]
pub struct BootHarness {
    root: PathBuf,
    registry: ArchRegistry,
    indicators: IndicatorSet,
    quiet: bool,
    logger: Option<RunLogger>,
}

impl BootHarness {
    /// Create a harness rooted at `root`. The directory must exist and
    /// contain the build-system marker file.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .map_err(|_| HarnessError::BadRoot(root.to_path_buf()))?;
        if !ROOT_MARKERS.iter().any(|m| root.join(m).exists()) {
            return Err(HarnessError::BadRoot(root));
        }
        Ok(Self {
            root,
            registry: ArchRegistry::builtin(),
            indicators: IndicatorSet::boot_defaults(),
            quiet: false,
            logger: None,
        })
    }

    /// Replace the target table (for seeding tests).
    pub fn registry(mut self, registry: ArchRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the indicator phrases.
    pub fn indicators(mut self, indicators: IndicatorSet) -> Self {
        self.indicators = indicators;
        self
    }

    /// Suppress the per-line console echo. Detection notices and the
    /// summary still print.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Enable artifact persistence under `dir`.
    pub fn log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.logger = dir.map(RunLogger::new);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run boot tests for the selected targets, or for every registered
    /// target when the selection is empty. Unknown names are skipped with a
    /// warning; the rest still run.
    pub async fn run(&self, selection: &[String]) -> Vec<RunOutcome> {
        let mut selected: Vec<&ArchDescriptor> = Vec::new();
        if selection.is_empty() {
            selected.extend(self.registry.descriptors());
        } else {
            for name in selection {
                match self.registry.lookup(name) {
                    Some(descriptor) => selected.push(descriptor),
                    None => {
                        println!("Unknown architecture: {name}");
                        warn!(arch = %name, "skipping unknown target");
                    }
                }
            }
        }

        let mut outcomes = Vec::with_capacity(selected.len());
        for descriptor in selected {
            outcomes.push(self.run_target(descriptor).await);
        }
        outcomes
    }

    /// Launch, monitor, and tear down one target.
    async fn run_target(&self, descriptor: &ArchDescriptor) -> RunOutcome {
        println!("\nRunning boot test for {}...", descriptor.name);
        if !self.quiet {
            let script = self.root.join("scripts").join(descriptor.script);
            match descriptor.extra_args {
                Some(args) => println!("Executing command: {} {}", script.display(), args),
                None => println!("Executing command: {}", script.display()),
            }
        }

        let mut process = match launcher::launch(&self.root, descriptor) {
            Ok(process) => process,
            Err(err) => {
                println!("{err}");
                warn!(arch = descriptor.name, %err, "launch failed");
                return RunOutcome {
                    target: descriptor.name.to_string(),
                    outcome: Outcome::LaunchError,
                    transcript: Vec::new(),
                };
            }
        };

        let report = monitor::monitor(
            &mut process,
            descriptor.timeout,
            &self.indicators,
            descriptor.name,
            self.quiet,
        )
        .await;

        if !self.quiet {
            println!("Terminating emulator process...");
        }
        lifecycle::shutdown(&mut process).await;

        let outcome = RunOutcome {
            target: descriptor.name.to_string(),
            outcome: report.outcome,
            transcript: report.transcript,
        };

        if let Some(logger) = &self.logger {
            match logger.persist_transcript(&outcome.target, &outcome.transcript) {
                Ok(path) => {
                    if !self.quiet {
                        println!("[{}] wrote log to {}", outcome.target, path.display());
                    }
                }
                Err(err) => {
                    println!("[{}] failed to write log: {err}", outcome.target);
                    warn!(arch = %outcome.target, %err, "transcript write failed");
                }
            }
        }

        info!(arch = %outcome.target, outcome = ?outcome.outcome, "boot test finished");
        outcome
    }

    /// Render the summary, persist it when logging is enabled, and return
    /// it so the caller can derive the exit code.
    pub fn report(&self, outcomes: &[RunOutcome]) -> SummaryReport {
        let summary = SummaryReport::new(outcomes);
        summary.print();

        if let Some(logger) = &self.logger {
            match logger.persist_summary(summary.lines()) {
                Ok(path) => println!("Summary written to {}", path.display()),
                Err(err) => println!("Failed to write summary: {err}"),
            }
            if let Err(err) = logger.persist_summary_json(outcomes) {
                warn!(%err, "summary.json write failed");
            }
        }

        summary
    }
}
