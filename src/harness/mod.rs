//! Boot-test harness engine
//!
//! This module contains:
//! - `registry` - the target architecture table
//! - `launcher` - emulator process spawning with merged console output
//! - `monitor` - the bounded polling loop over console output
//! - `patterns` - pass/fail indicator matching
//! - `lifecycle` - escalating process teardown
//! - `logger` - transcript and summary artifacts
//! - `result` - run outcome and summary types
//! - `orchestrator` - the sequential multi-target driver
//! - `error` - harness error types

pub mod error;
pub mod launcher;
pub mod lifecycle;
pub mod logger;
pub mod monitor;
pub mod orchestrator;
pub mod patterns;
pub mod registry;
pub mod result;

pub use error::HarnessError;
pub use launcher::{launch, EmulatorProcess, LaunchError, ROOT_ENV, SELFTEST_ENV};
pub use lifecycle::{shutdown, GRACE_PERIOD};
pub use logger::RunLogger;
pub use monitor::{MonitorReport, POLL_SLICE};
pub use orchestrator::BootHarness;
pub use patterns::{IndicatorSet, Signal, FAILURE_INDICATORS, SUCCESS_INDICATORS};
pub use registry::{ArchDescriptor, ArchRegistry};
pub use result::{Outcome, RunOutcome, SummaryReport};
