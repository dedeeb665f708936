//! Run outcome and summary types

use serde::Serialize;

/// Terminal classification of one target's boot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A success indicator appeared in the console output.
    Passed,
    /// A failure indicator appeared, or the emulator exited without any
    /// verdict.
    Failed,
    /// The timeout budget elapsed before any verdict.
    TimedOut,
    /// The emulator could not be launched at all.
    LaunchError,
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    /// Status column text in the summary table.
    pub fn status_text(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASSED",
            Outcome::Failed => "FAILED",
            Outcome::TimedOut => "TIMED OUT",
            Outcome::LaunchError => "LAUNCH ERROR",
        }
    }
}

/// Result of one target's boot run, finalized by the output monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub target: String,
    pub outcome: Outcome,
    /// Full console capture in arrival order, including any trailing
    /// unterminated line.
    pub transcript: Vec<String>,
}

/// Read-only aggregate over the run outcomes of one invocation.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub passed: usize,
    pub total: usize,
    lines: Vec<String>,
}

impl SummaryReport {
    pub fn new(outcomes: &[RunOutcome]) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.outcome.is_pass()).count();

        let mut lines = Vec::new();
        lines.push("=".repeat(50));
        lines.push("TEST SUMMARY".to_string());
        lines.push("=".repeat(50));
        for outcome in outcomes {
            let symbol = if outcome.outcome.is_pass() { "✓" } else { "✗" };
            lines.push(format!(
                "{} {:10} {}",
                symbol,
                outcome.target,
                outcome.outcome.status_text()
            ));
        }
        lines.push("-".repeat(50));
        lines.push(format!("Total: {passed}/{total} architectures passed"));
        lines.push(if total > 0 && passed == total {
            "All architectures passed!".to_string()
        } else {
            "Some architectures failed!".to_string()
        });

        Self {
            passed,
            total,
            lines,
        }
    }

    /// Every requested target passed and at least one actually ran.
    ///
    /// Zero runs means the whole selection was unknown or empty, which is a
    /// misconfiguration and must not report as success.
    pub fn success(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }

    /// The summary exactly as persisted to `summary.txt`.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print the summary to the console, with the banner line swapped for
    /// its emoji form.
    pub fn print(&self) {
        println!();
        for line in &self.lines[..self.lines.len() - 1] {
            println!("{line}");
        }
        if self.success() {
            println!("🎉 All architectures passed!");
        } else {
            println!("❌ Some architectures failed!");
        }
    }
}
