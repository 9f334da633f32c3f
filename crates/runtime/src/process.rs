//! Browser process management.
//!
//! Spawns the browser binary with the derived launch arguments and waits
//! for it to announce its DevTools WebSocket endpoint on stderr.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, Command};
use tracing::{debug, trace};

/// Prefix of the stderr line announcing the DevTools endpoint.
const ENDPOINT_PREFIX: &str = "DevTools listening on ";

/// A running browser process plus its DevTools endpoint.
#[derive(Debug)]
pub struct BrowserProcess {
    process: Child,
    ws_endpoint: String,
}

impl BrowserProcess {
    /// Spawn the browser and wait for its DevTools endpoint line.
    ///
    /// The process is spawned with `kill_on_drop`, so dropping the handle on
    /// any failure path terminates the browser rather than leaking it.
    ///
    /// # Errors
    ///
    /// Returns `Error::LaunchFailed` if the process cannot be spawned, exits
    /// during startup, or closes stderr without announcing an endpoint.
    pub async fn spawn(executable: &Path, args: &[String]) -> Result<Self> {
        let mut cmd = Command::new(executable);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            Error::LaunchFailed(format!("failed to spawn {}: {e}", executable.display()))
        })?;

        // A bad flag or missing shared library makes the browser exit
        // within milliseconds; catch that before waiting on stderr.
        tokio::time::sleep(Duration::from_millis(100)).await;
        match child.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::LaunchFailed(format!(
                    "browser exited immediately with status: {status}"
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Err(Error::LaunchFailed(format!(
                    "failed to check process status: {e}"
                )));
            }
        }

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::LaunchFailed("browser stderr was not captured".to_string()))?;
        let mut lines = BufReader::new(stderr).lines();

        let ws_endpoint = match read_ws_endpoint(&mut lines).await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                let _ = child.start_kill();
                return Err(e);
            }
        };

        // Keep draining stderr so the browser never blocks on a full pipe.
        tokio::spawn(drain_stderr(lines));

        debug!(target: "extlaunch", %ws_endpoint, "browser ready");
        Ok(Self {
            process: child,
            ws_endpoint,
        })
    }

    /// The `ws://` DevTools endpoint announced by the browser.
    pub fn ws_endpoint(&self) -> &str {
        &self.ws_endpoint
    }

    /// OS process id, if the process is still running.
    pub fn id(&self) -> Option<u32> {
        self.process.id()
    }

    /// Wait for the browser to exit on its own, bounded by `timeout`.
    ///
    /// Returns true if the process exited within the window. Used after
    /// `Browser.close` to give the browser a chance to shut down cleanly.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.process.wait())
            .await
            .is_ok()
    }

    /// Kill the process and reap it, bounded.
    pub async fn shutdown(mut self) -> Result<()> {
        self.process
            .kill()
            .await
            .map_err(|e| Error::LaunchFailed(format!("failed to kill browser: {e}")))?;
        let _ = tokio::time::timeout(Duration::from_secs(5), self.process.wait()).await;
        Ok(())
    }
}

async fn read_ws_endpoint(lines: &mut Lines<BufReader<ChildStderr>>) -> Result<String> {
    loop {
        let line = lines
            .next_line()
            .await
            .map_err(|e| Error::LaunchFailed(format!("failed to read browser stderr: {e}")))?;
        let Some(line) = line else {
            return Err(Error::LaunchFailed(
                "browser exited before announcing a DevTools endpoint".to_string(),
            ));
        };
        if let Some(endpoint) = line.strip_prefix(ENDPOINT_PREFIX) {
            return Ok(endpoint.trim().to_string());
        }
        trace!(target: "extlaunch.browser", "{line}");
    }
}

async fn drain_stderr(mut lines: Lines<BufReader<ChildStderr>>) {
    while let Ok(Some(line)) = lines.next_line().await {
        trace!(target: "extlaunch.browser", "{line}");
    }
}
