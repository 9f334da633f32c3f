//! Browser handle: launch, page creation, close.

use crate::options::LaunchOptions;
use crate::page::Page;
use crate::{Error, Result};
use extlaunch_protocol::commands::{
    AttachToTargetParams, AttachToTargetResult, BROWSER_CLOSE, BROWSER_GET_VERSION,
    CreateTargetParams, CreateTargetResult, GetVersionResult, TARGET_ATTACH_TO_TARGET,
    TARGET_CREATE_TARGET,
};
use extlaunch_runtime::connection::{Connection, ConnectionLike};
use extlaunch_runtime::process::BrowserProcess;
use extlaunch_runtime::{finder, transport};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};

/// A running browser owned by this process.
///
/// Dropping the handle kills the underlying process (`kill_on_drop`);
/// prefer [`Browser::close`] for an orderly shutdown.
pub struct Browser {
    connection: Arc<dyn ConnectionLike>,
    process: Option<BrowserProcess>,
    // Held for the browser's lifetime; deleting it on drop removes the
    // throwaway profile.
    profile_dir: Option<TempDir>,
    version: Option<GetVersionResult>,
    navigation_timeout: Duration,
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("process", &self.process)
            .field("profile_dir", &self.profile_dir)
            .field("version", &self.version)
            .field("navigation_timeout", &self.navigation_timeout)
            .finish_non_exhaustive()
    }
}

impl Browser {
    /// Launch a browser process with the extension flags applied.
    ///
    /// Sequence: validate options, resolve the executable, spawn with the
    /// derived arguments and a throwaway profile, connect to the announced
    /// DevTools endpoint, then handshake with `Browser.getVersion`.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid options; no process is spawned and no command
    /// is issued. Later failures shut the partially started browser down
    /// before returning.
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        options.validate()?;

        let executable = match &options.executable {
            Some(path) if path.is_file() => path.clone(),
            Some(path) => {
                return Err(Error::LaunchFailed(format!(
                    "browser executable {} does not exist",
                    path.display()
                )));
            }
            None => finder::find_browser_executable()?,
        };

        let profile_dir = tempfile::Builder::new()
            .prefix("extlaunch-profile-")
            .tempdir()?;
        let mut args = options.to_args();
        args.push(format!("--user-data-dir={}", profile_dir.path().display()));

        info!(
            target: "extlaunch",
            executable = %executable.display(),
            extension = %options.extension_path.display(),
            headless = options.headless,
            "launching browser"
        );

        let process = tokio::time::timeout(
            options.launch_timeout,
            BrowserProcess::spawn(&executable, &args),
        )
        .await
        .map_err(|_| {
            Error::Timeout(format!(
                "browser launch did not complete within {:?}",
                options.launch_timeout
            ))
        })??;

        // Failure past this point drops `process`, which kills the browser.
        let (sender, receiver) = transport::connect(process.ws_endpoint()).await?;
        let connection: Arc<dyn ConnectionLike> = Arc::new(Connection::new(sender, receiver));

        let payload = connection
            .send_command(BROWSER_GET_VERSION, None, Value::Null)
            .await?;
        let version: GetVersionResult = serde_json::from_value(payload)?;
        debug!(target: "extlaunch", product = %version.product, "connected");

        Ok(Self {
            connection,
            process: Some(process),
            profile_dir: Some(profile_dir),
            version: Some(version),
            navigation_timeout: options.navigation_timeout,
        })
    }

    /// Open a new page (tab).
    ///
    /// Creates a blank target and attaches to it in flat mode, so page
    /// commands can be addressed by session id on the same connection.
    pub async fn new_page(&self) -> Result<Page> {
        let params = serde_json::to_value(CreateTargetParams::new("about:blank"))?;
        let payload = self
            .connection
            .send_command(TARGET_CREATE_TARGET, None, params)
            .await?;
        let created: CreateTargetResult = serde_json::from_value(payload)?;

        let params = serde_json::to_value(AttachToTargetParams::flat(created.target_id.as_str()))?;
        let payload = self
            .connection
            .send_command(TARGET_ATTACH_TO_TARGET, None, params)
            .await?;
        let attached: AttachToTargetResult = serde_json::from_value(payload)?;

        debug!(
            target: "extlaunch",
            target_id = %created.target_id,
            session_id = %attached.session_id,
            "page open"
        );

        Ok(Page::new(
            Arc::clone(&self.connection),
            created.target_id,
            attached.session_id,
            self.navigation_timeout,
        ))
    }

    /// Version info reported by the browser during the handshake.
    pub fn version(&self) -> Option<&GetVersionResult> {
        self.version.as_ref()
    }

    /// OS process id of the browser, when this handle owns one.
    pub fn process_id(&self) -> Option<u32> {
        self.process.as_ref().and_then(BrowserProcess::id)
    }

    /// Close the browser and reap its process.
    ///
    /// Asks the browser to close itself first; if it does not exit within a
    /// grace period the process is killed. The temporary profile directory
    /// is removed either way.
    pub async fn close(mut self) -> Result<()> {
        let polite = self
            .connection
            .send_command(BROWSER_CLOSE, None, Value::Null)
            .await;

        if let Some(mut process) = self.process.take() {
            let exited =
                polite.is_ok() && process.wait_with_timeout(Duration::from_secs(5)).await;
            if exited {
                debug!(target: "extlaunch", "browser exited cleanly");
            } else {
                process.shutdown().await?;
            }
        }

        drop(self.profile_dir.take());
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests(connection: Arc<dyn ConnectionLike>) -> Self {
        Self {
            connection,
            process: None,
            profile_dir: None,
            version: None,
            navigation_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockConnection;
    use extlaunch_protocol::commands::{PAGE_NAVIGATE, TARGET_CLOSE_TARGET};
    use serde_json::json;

    #[tokio::test]
    async fn new_page_creates_then_attaches() {
        let mock = MockConnection::new();
        mock.respond(TARGET_CREATE_TARGET, json!({"targetId": "target-1"}));
        mock.respond(TARGET_ATTACH_TO_TARGET, json!({"sessionId": "session-1"}));

        let browser = Browser::for_tests(mock.clone());
        let page = browser.new_page().await.unwrap();

        assert_eq!(page.target_id(), "target-1");
        assert_eq!(page.session_id(), "session-1");
        assert_eq!(
            mock.methods(),
            [TARGET_CREATE_TARGET, TARGET_ATTACH_TO_TARGET]
        );
    }

    #[tokio::test]
    async fn full_sequence_is_create_attach_navigate_and_nothing_else() {
        let mock = MockConnection::new();
        mock.respond(TARGET_CREATE_TARGET, json!({"targetId": "target-1"}));
        mock.respond(TARGET_ATTACH_TO_TARGET, json!({"sessionId": "session-1"}));
        mock.respond(PAGE_NAVIGATE, json!({"frameId": "frame-1"}));

        let browser = Browser::for_tests(mock.clone());
        let page = browser.new_page().await.unwrap();
        page.goto("https://example.com").await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].method, TARGET_CREATE_TARGET);
        assert_eq!(calls[1].method, TARGET_ATTACH_TO_TARGET);
        assert_eq!(calls[2].method, PAGE_NAVIGATE);
        // Navigation is addressed at the attached session, not the browser.
        assert_eq!(calls[2].session_id.as_deref(), Some("session-1"));
        assert_eq!(calls[2].params["url"], "https://example.com");
    }

    #[tokio::test]
    async fn rejected_page_creation_stops_the_sequence() {
        let mock = MockConnection::new();
        mock.fail(TARGET_CREATE_TARGET, -32000, "cannot create target");

        let browser = Browser::for_tests(mock.clone());
        let err = browser.new_page().await.unwrap_err();

        assert!(matches!(err, Error::Cdp { .. }));
        // No attach, no navigate: fail-fast with no partial progress.
        assert_eq!(mock.methods(), [TARGET_CREATE_TARGET]);
    }

    #[tokio::test]
    async fn close_issues_browser_close() {
        let mock = MockConnection::new();
        let browser = Browser::for_tests(mock.clone());
        browser.close().await.unwrap();
        assert_eq!(mock.methods(), [BROWSER_CLOSE]);
    }

    #[tokio::test]
    async fn sequential_sessions_share_no_state() {
        for _ in 0..2 {
            let mock = MockConnection::new();
            mock.respond(TARGET_CREATE_TARGET, json!({"targetId": "target-1"}));
            mock.respond(TARGET_ATTACH_TO_TARGET, json!({"sessionId": "session-1"}));
            mock.respond(PAGE_NAVIGATE, json!({"frameId": "frame-1"}));
            mock.respond(TARGET_CLOSE_TARGET, json!({"success": true}));

            let browser = Browser::for_tests(mock.clone());
            let page = browser.new_page().await.unwrap();
            page.goto("https://example.com").await.unwrap();
            page.close().await.unwrap();
            browser.close().await.unwrap();

            assert_eq!(
                mock.methods(),
                [
                    TARGET_CREATE_TARGET,
                    TARGET_ATTACH_TO_TARGET,
                    PAGE_NAVIGATE,
                    TARGET_CLOSE_TARGET,
                    BROWSER_CLOSE,
                ]
            );
        }
    }
}
