//! Wire types for the Chrome DevTools Protocol subset used by extlaunch.
//!
//! This crate contains the serde-serializable shapes of data as they appear
//! on the DevTools WebSocket. Types here are pure data: no behavior beyond
//! serialization and deserialization, matching the browser's wire format
//! field for field.
//!
//! The higher-level ergonomic API is built on top of these types in the
//! `extlaunch` crate; request/response plumbing lives in `extlaunch-runtime`.

pub mod commands;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command envelope.
///
/// `session_id` targets a command at an attached page session; commands
/// without it address the browser endpoint itself.
#[derive(Debug, Clone, Serialize)]
pub struct CdpRequest {
    pub id: u32,
    pub method: String,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

/// Error object the browser attaches to a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdpError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Response to a previously sent command, correlated by `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpResponse {
    pub id: u32,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<CdpError>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Unsolicited notification from the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpEvent {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Any message arriving on the wire: a response carries an `id`, an event
/// carries a `method`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CdpIncoming {
    Response(CdpResponse),
    Event(CdpEvent),
}
