//! Task payloads for the captcha task API.
//!
//! Field names follow the API's JSON contract exactly; note the `URL`
//! capitalization in `websiteURL`, which camelCase renaming cannot produce.

use serde::Serialize;

/// An AWS WAF token challenge.
///
/// The `aws_*` values must be extracted from the protected page at runtime
/// (the challenge rotates them); this type just carries them to the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsWafTokenTask {
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    pub aws_key: String,
    pub aws_iv: String,
    pub aws_context: String,
    #[serde(rename = "awsChallengeJS", skip_serializing_if = "Option::is_none")]
    pub aws_challenge_js: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_api_js: Option<String>,
    /// `scheme:user:pass@ip:port`; switches the task to the proxied type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

/// An AWS WAF image classification challenge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsWafImageTask {
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    /// Base64-encoded challenge images.
    pub images: Vec<String>,
    /// Question string shown by the challenge, e.g. `aws:grid:chair`.
    pub question: String,
}

/// A task as submitted to `createTask`, tagged with the API's type name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Task {
    #[serde(rename = "AntiAwsWafTaskProxyLess")]
    AwsWafTokenProxyless(AwsWafTokenTask),
    #[serde(rename = "AntiAwsWafTask")]
    AwsWafToken(AwsWafTokenTask),
    #[serde(rename = "AwsWafClassification")]
    AwsWafClassification(AwsWafImageTask),
}

impl Task {
    /// Wrap a token task, picking the proxied variant when a proxy is set.
    pub fn from_token_task(task: AwsWafTokenTask) -> Self {
        if task.proxy.is_some() {
            Task::AwsWafToken(task)
        } else {
            Task::AwsWafTokenProxyless(task)
        }
    }
}
