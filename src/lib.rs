//! # Boot Harness
//!
//! An orchestration harness for emulator boot tests: boots firmware for one
//! or more target architectures via their emulator launch scripts, watches
//! each console for the embedded test suite's verdict, and aggregates the
//! results into a summary table and a process exit code.
//!
//! ## Features
//!
//! - **Multi-target runs** - seven builtin architectures, selectable per run
//! - **Line-oriented verdict detection** - case-insensitive indicator
//!   phrases matched over reassembled console lines
//! - **Bounded monitoring** - each target's timeout budget is enforced by a
//!   readiness-based polling loop, never a blocking line read, so a stalled
//!   emulator that printed half a line cannot hang the harness
//! - **Clean teardown** - graceful terminate, grace period, forced kill; no
//!   emulator process survives its run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boot_harness::BootHarness;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let harness = BootHarness::new(".")?;
//!     let outcomes = harness.run(&["arm".to_string()]).await;
//!     let summary = harness.report(&outcomes);
//!
//!     println!("all passed: {}", summary.success());
//!     Ok(())
//! }
//! ```

pub mod harness;

// Re-export main types
pub use harness::{
    ArchDescriptor, ArchRegistry, BootHarness, EmulatorProcess, HarnessError, IndicatorSet,
    LaunchError, MonitorReport, Outcome, RunLogger, RunOutcome, Signal, SummaryReport,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::harness::{
        ArchDescriptor, ArchRegistry, BootHarness, IndicatorSet, Outcome, RunOutcome,
        SummaryReport,
    };
}
