//! Page handle: navigation over an attached target session.

use crate::options::validate_url;
use crate::{Error, Result};
use extlaunch_protocol::commands::{
    CloseTargetParams, NavigateParams, NavigateResult, PAGE_NAVIGATE, TARGET_CLOSE_TARGET,
};
use extlaunch_runtime::connection::ConnectionLike;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A single page (tab) attached in flat mode.
pub struct Page {
    connection: Arc<dyn ConnectionLike>,
    target_id: String,
    session_id: String,
    navigation_timeout: Duration,
    /// Last URL a navigation was acknowledged for.
    url: RwLock<String>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("target_id", &self.target_id)
            .field("session_id", &self.session_id)
            .field("navigation_timeout", &self.navigation_timeout)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub(crate) fn new(
        connection: Arc<dyn ConnectionLike>,
        target_id: String,
        session_id: String,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            connection,
            target_id,
            session_id,
            navigation_timeout,
            url: RwLock::new("about:blank".to_string()),
        }
    }

    /// Navigate to `url` and wait for the browser to acknowledge it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` without touching the browser when the URL
    /// does not parse, and `Error::NavigationFailed` when the browser
    /// reports an error text or the acknowledgement times out.
    pub async fn goto(&self, url: &str) -> Result<()> {
        validate_url(url)?;

        info!(target: "extlaunch", %url, "navigate");
        let params = serde_json::to_value(NavigateParams::new(url))?;
        let send = self
            .connection
            .send_command(PAGE_NAVIGATE, Some(&self.session_id), params);

        let payload = tokio::time::timeout(self.navigation_timeout, send)
            .await
            .map_err(|_| Error::NavigationFailed {
                url: url.to_string(),
                reason: format!("not acknowledged within {:?}", self.navigation_timeout),
            })?
            .map_err(|e| match e {
                Error::Cdp { code, message } => Error::NavigationFailed {
                    url: url.to_string(),
                    reason: format!("browser error {code}: {message}"),
                },
                other => other,
            })?;

        let result: NavigateResult = serde_json::from_value(payload)?;
        if let Some(error_text) = result.error_text {
            return Err(Error::NavigationFailed {
                url: url.to_string(),
                reason: error_text,
            });
        }

        *self.url.write() = url.to_string();
        Ok(())
    }

    /// URL of the last acknowledged navigation (`about:blank` before any).
    pub fn url(&self) -> String {
        self.url.read().clone()
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Close this page's target.
    pub async fn close(&self) -> Result<()> {
        let params = serde_json::to_value(CloseTargetParams {
            target_id: self.target_id.clone(),
        })?;
        self.connection
            .send_command(TARGET_CLOSE_TARGET, None, params)
            .await
            .map(|_| ())
    }
}
