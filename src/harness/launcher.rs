//! Emulator process launcher
//!
//! Spawns the launch script for one target as a child process, with the
//! script's stdout and stderr merged into a single ordered byte channel,
//! and the environment variables that switch the booted firmware into
//! run-self-tests mode.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::debug;

use super::registry::ArchDescriptor;

/// Environment variable carrying the absolute project root to the script.
pub const ROOT_ENV: &str = "BOOT_HARNESS_ROOT";

/// Environment variable telling the booted firmware to run its embedded
/// test suite at boot.
pub const SELFTEST_ENV: &str = "RUN_SELFTESTS_AT_BOOT";

const READ_CHUNK: usize = 4096;

/// Errors that prevent an emulator from starting.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Launch script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Failed to spawn {script}: {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to a launched emulator: the child process plus the merged
/// stdout/stderr byte channel.
///
/// The handle is owned exclusively by the monitor and the shutdown path for
/// the duration of one run; nothing else reads from or signals it.
#[derive(Debug)]
pub struct EmulatorProcess {
    child: Child,
    output: mpsc::Receiver<Vec<u8>>,
}

/// Launch the emulator script for `descriptor` out of `root`.
pub fn launch(root: &Path, descriptor: &ArchDescriptor) -> Result<EmulatorProcess, LaunchError> {
    let script_path = root.join("scripts").join(descriptor.script);
    if !script_path.exists() {
        return Err(LaunchError::ScriptNotFound(script_path));
    }

    let mut command = Command::new(&script_path);
    if let Some(args) = descriptor.extra_args {
        // The launch scripts take their whole option string as one token.
        command.arg(args);
    }
    command
        .current_dir(root)
        .env(ROOT_ENV, root)
        .env(SELFTEST_ENV, "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(script = %script_path.display(), "spawning emulator launch script");
    let mut child = command.spawn().map_err(|source| LaunchError::Spawn {
        script: descriptor.script.to_string(),
        source,
    })?;

    // Pump both pipes into one channel so the monitor sees a single merged
    // stream. The channel closes once both pipes reach EOF.
    let (tx, output) = mpsc::channel(64);
    if let Some(stdout) = child.stdout.take() {
        spawn_pump(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_pump(stderr, tx);
    }

    Ok(EmulatorProcess { child, output })
}

fn spawn_pump<R>(mut reader: R, tx: mpsc::Sender<Vec<u8>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).await.is_err() {
                        break;
                    }
                }
            }
        }
    });
}

impl EmulatorProcess {
    /// Receive the next chunk of combined output. `None` means both output
    /// pipes reached EOF.
    pub async fn recv_output(&mut self) -> Option<Vec<u8>> {
        self.output.recv().await
    }

    /// Whether the child has exited, without blocking.
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    /// OS process id, `None` once the child has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Ask the child to shut down gracefully. No-op once it has been reaped.
    pub fn terminate(&mut self) {
        #[cfg(unix)]
        if let Some(pid) = self.child.id() {
            // SAFETY: pid is a live, unreaped child of this process.
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
        }
        #[cfg(not(unix))]
        let _ = self.child.start_kill();
    }

    /// Force-kill the child and reap it.
    pub async fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill().await
    }

    /// Wait for the child to exit and reap it.
    pub async fn wait(&mut self) -> std::io::Result<std::process::ExitStatus> {
        self.child.wait().await
    }
}
