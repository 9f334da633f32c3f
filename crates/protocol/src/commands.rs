//! Typed parameter and result payloads for the commands extlaunch issues.
//!
//! Method name constants live next to their payload types so callers never
//! pair a payload with the wrong method string.

use serde::{Deserialize, Serialize};

pub const BROWSER_GET_VERSION: &str = "Browser.getVersion";
pub const BROWSER_CLOSE: &str = "Browser.close";
pub const TARGET_CREATE_TARGET: &str = "Target.createTarget";
pub const TARGET_ATTACH_TO_TARGET: &str = "Target.attachToTarget";
pub const TARGET_CLOSE_TARGET: &str = "Target.closeTarget";
pub const PAGE_NAVIGATE: &str = "Page.navigate";

/// Result of `Browser.getVersion`, used as the connection handshake.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVersionResult {
    pub protocol_version: String,
    pub product: String,
    pub revision: String,
    pub user_agent: String,
    pub js_version: String,
}

/// Parameters for `Target.createTarget`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetParams {
    pub url: String,
}

impl CreateTargetParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Result of `Target.createTarget`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetResult {
    pub target_id: String,
}

/// Parameters for `Target.attachToTarget`.
///
/// `flatten` makes the browser route the attached session through the main
/// connection, addressed by `sessionId`, instead of nested messages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachToTargetParams {
    pub target_id: String,
    pub flatten: bool,
}

impl AttachToTargetParams {
    pub fn flat(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            flatten: true,
        }
    }
}

/// Result of `Target.attachToTarget`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachToTargetResult {
    pub session_id: String,
}

/// Parameters for `Target.closeTarget`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTargetParams {
    pub target_id: String,
}

/// Parameters for `Page.navigate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

impl NavigateParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referrer: None,
        }
    }
}

/// Result of `Page.navigate`.
///
/// A present `error_text` means the navigation failed even though the
/// command itself succeeded (e.g. `net::ERR_NAME_NOT_RESOLVED`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateResult {
    pub frame_id: String,
    #[serde(default)]
    pub loader_id: Option<String>,
    #[serde(default)]
    pub error_text: Option<String>,
}
