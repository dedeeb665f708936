//! Emulator process teardown
//!
//! Escalating shutdown: a graceful termination request, a short grace
//! period, then a forced kill. The child is always reaped, so no zombie
//! survives a run regardless of how the monitor loop ended.

use std::time::Duration;

use tracing::{debug, warn};

use super::launcher::EmulatorProcess;

/// How long a child gets to exit after the graceful request.
pub const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Shut the emulator down and reap it. Safe to call when it has already
/// exited.
pub async fn shutdown(process: &mut EmulatorProcess) {
    if process.has_exited() {
        return;
    }

    process.terminate();
    match tokio::time::timeout(GRACE_PERIOD, process.wait()).await {
        Ok(Ok(status)) => debug!(%status, "emulator exited after terminate"),
        Ok(Err(err)) => warn!(%err, "failed waiting for emulator exit"),
        Err(_) => {
            debug!("grace period elapsed, force-killing emulator");
            if let Err(err) = process.kill().await {
                warn!(%err, "failed to kill emulator process");
            }
        }
    }
}
