//! Boot output monitor
//!
//! Drives the watch loop for one emulator run: pulls raw bytes off the
//! merged output channel with a bounded readiness wait, reassembles
//! completed lines, classifies each against the indicator set, and stops at
//! the first unambiguous verdict or when the timeout budget is spent.
//!
//! The wait is bounded (never longer than one slice) so the deadline is
//! re-checked promptly even when the emulator prints a partial line and
//! stalls. A blocking line read here would hang past the budget.

use std::time::{Duration, Instant};

use tracing::debug;

use super::launcher::EmulatorProcess;
use super::patterns::{IndicatorSet, Signal};
use super::result::Outcome;

/// Upper bound on one readiness wait.
pub const POLL_SLICE: Duration = Duration::from_secs(1);

/// What the monitor saw during one run.
#[derive(Debug)]
pub struct MonitorReport {
    /// Terminal classification; never [`Outcome::LaunchError`] here.
    pub outcome: Outcome,
    /// Full console capture in arrival order.
    pub transcript: Vec<String>,
}

/// Watch the emulator's merged output until a verdict, process exit, or
/// timeout. The state machine is RUNNING → {PASSED, FAILED, TIMED_OUT};
/// once a terminal state is reached the loop never resumes.
pub async fn monitor(
    process: &mut EmulatorProcess,
    timeout: Duration,
    indicators: &IndicatorSet,
    target: &str,
    quiet: bool,
) -> MonitorReport {
    let start = Instant::now();
    let mut buffer: Vec<u8> = Vec::new();
    let mut transcript = Vec::new();
    let mut passed = false;
    let mut timed_out = false;

    'run: loop {
        if start.elapsed() > timeout {
            println!("Timeout reached for {target}");
            timed_out = true;
            break;
        }

        match tokio::time::timeout(POLL_SLICE, process.recv_output()).await {
            Ok(Some(chunk)) => {
                buffer.extend_from_slice(&chunk);
                while let Some(line) = pop_line(&mut buffer) {
                    if !quiet {
                        println!("[{target}] {line}");
                    }
                    let signal = indicators.classify(&line);
                    transcript.push(line);
                    match signal {
                        Signal::Success => {
                            println!("✓ Test success detected for {target}");
                            passed = true;
                            break 'run;
                        }
                        Signal::Failure => {
                            println!("✗ Test failure detected for {target}");
                            break 'run;
                        }
                        Signal::None => {}
                    }
                }
            }
            Ok(None) => {
                // Both pipes reached EOF. The run is over once the child is
                // gone; until then only the deadline can end it.
                if process.has_exited() {
                    break;
                }
                tokio::time::sleep(POLL_SLICE).await;
            }
            Err(_) => {
                // Slice elapsed with no data. Catches a child that exited
                // while a grandchild still holds the pipe open.
                if buffer.is_empty() && process.has_exited() {
                    break;
                }
            }
        }
    }

    // Keep any unterminated tail for transcript completeness.
    if let Some(tail) = flush_tail(&mut buffer) {
        if !quiet {
            println!("[{target}] {tail}");
        }
        transcript.push(tail);
    }

    let outcome = if passed {
        Outcome::Passed
    } else if timed_out {
        Outcome::TimedOut
    } else {
        // An explicit failure verdict, or the emulator went away without
        // printing any verdict at all.
        Outcome::Failed
    };
    debug!(
        arch = target,
        ?outcome,
        lines = transcript.len(),
        "monitor loop finished"
    );

    MonitorReport { outcome, transcript }
}

/// Split the next `\n`-terminated prefix out of `buffer` as a completed
/// line, leaving the remainder in place. A trailing `\r` is stripped.
fn pop_line(buffer: &mut Vec<u8>) -> Option<String> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let mut raw: Vec<u8> = buffer.drain(..=pos).collect();
    raw.pop();
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    Some(String::from_utf8_lossy(&raw).into_owned())
}

/// Take whatever is left in the buffer as a final, unterminated line.
fn flush_tail(buffer: &mut Vec<u8>) -> Option<String> {
    if buffer.is_empty() {
        return None;
    }
    let tail = String::from_utf8_lossy(buffer)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    buffer.clear();
    if tail.is_empty() {
        None
    } else {
        Some(tail)
    }
}
