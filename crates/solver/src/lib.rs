//! HTTP client for CapSolver-compatible captcha task APIs.
//!
//! Two flows are supported, mirroring the API's own split:
//!
//! - **Token tasks** (`AntiAwsWafTask*`): `createTask` returns a task id,
//!   which is polled through `getTaskResult` until the solution (a token
//!   cookie) is ready.
//! - **Image classification** (`AwsWafClassification`): the solution comes
//!   back directly in the `createTask` response; no polling.
//!
//! The extension loaded by the `extlaunch` crate solves captchas inside the
//! browser on its own; this client is the out-of-band alternative for
//! challenges that expose their parameters directly.

pub mod error;
pub mod tasks;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub use error::{Result, SolverError};
pub use tasks::{AwsWafImageTask, AwsWafTokenTask, Task};

/// Production endpoint of the task API.
pub const DEFAULT_API_BASE: &str = "https://api.capsolver.com";

/// Interval between `getTaskResult` polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polling budget; at the default interval this is two minutes.
pub const MAX_POLL_ATTEMPTS: u32 = 24;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest<'a> {
    client_key: &'a str,
    task: &'a Task,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetTaskResultRequest<'a> {
    client_key: &'a str,
    task_id: &'a str,
}

/// Common response shape of both endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub error_id: i64,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub solution: Option<Value>,
}

impl ApiResponse {
    /// Turn an API-level error (`errorId != 0`) into a typed failure.
    fn into_result(self) -> Result<ApiResponse> {
        if self.error_id != 0 {
            return Err(SolverError::Api {
                error_id: self.error_id,
                code: self.error_code.unwrap_or_default(),
                description: self.error_description.unwrap_or_default(),
            });
        }
        Ok(self)
    }
}

/// Client for a CapSolver-compatible task API.
#[derive(Debug, Clone)]
pub struct SolverClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SolverClient {
    /// Client against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    /// Client against a custom endpoint (stub servers in tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Submit a task to `createTask`.
    pub async fn create_task(&self, task: &Task) -> Result<ApiResponse> {
        let body = CreateTaskRequest {
            client_key: &self.api_key,
            task,
        };
        self.post("createTask", &body).await
    }

    /// Fetch the current result of a task from `getTaskResult`.
    pub async fn get_task_result(&self, task_id: &str) -> Result<ApiResponse> {
        let body = GetTaskResultRequest {
            client_key: &self.api_key,
            task_id,
        };
        self.post("getTaskResult", &body).await
    }

    /// Solve an AWS WAF token challenge: create the task, poll until ready,
    /// and return the token cookie.
    pub async fn solve_aws_waf_token(&self, task: AwsWafTokenTask) -> Result<String> {
        let created = self.create_task(&Task::from_token_task(task)).await?;
        let task_id = created.task_id.ok_or_else(|| {
            SolverError::UnexpectedResponse("createTask returned no taskId".to_string())
        })?;
        info!(target: "extlaunch.solver", %task_id, "token task created, polling");

        for attempt in 1..=MAX_POLL_ATTEMPTS {
            tokio::time::sleep(POLL_INTERVAL).await;
            let result = self.get_task_result(&task_id).await?;
            match result.status.as_deref() {
                Some("ready") => {
                    let cookie = result
                        .solution
                        .as_ref()
                        .and_then(|solution| solution.get("cookie"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| {
                            SolverError::UnexpectedResponse(
                                "ready result is missing solution.cookie".to_string(),
                            )
                        })?;
                    info!(target: "extlaunch.solver", %task_id, "token ready");
                    return Ok(cookie);
                }
                Some("processing") | None => {
                    debug!(target: "extlaunch.solver", %task_id, attempt, "still processing");
                }
                Some(status) => {
                    return Err(SolverError::TaskFailed {
                        task_id,
                        status: status.to_string(),
                    });
                }
            }
        }

        Err(SolverError::PollExhausted {
            task_id,
            attempts: MAX_POLL_ATTEMPTS,
        })
    }

    /// Classify AWS WAF challenge images; the solution is synchronous.
    pub async fn classify_images(&self, task: AwsWafImageTask) -> Result<Value> {
        let created = self
            .create_task(&Task::AwsWafClassification(task))
            .await?;
        created.solution.ok_or_else(|| {
            SolverError::UnexpectedResponse("classification returned no solution".to_string())
        })
    }

    async fn post(&self, endpoint: &str, body: &impl Serialize) -> Result<ApiResponse> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        let response: ApiResponse = self.http.post(url).json(body).send().await?.json().await?;
        response.into_result()
    }
}

/// Read an image file and encode it for the `images` field.
pub fn encode_image(path: &Path) -> Result<String> {
    use base64::Engine as _;
    let bytes = std::fs::read(path).map_err(|source| SolverError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_task_request_wraps_client_key_and_task() {
        let task = Task::AwsWafClassification(AwsWafImageTask {
            website_url: "https://example.com".to_string(),
            images: vec!["aW1n".to_string()],
            question: "aws:grid:bed".to_string(),
        });
        let request = CreateTaskRequest {
            client_key: "CAP-TEST",
            task: &task,
        };
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["clientKey"], "CAP-TEST");
        assert_eq!(wire["task"]["type"], "AwsWafClassification");
    }

    #[test]
    fn get_task_result_request_uses_camel_case() {
        let request = GetTaskResultRequest {
            client_key: "CAP-TEST",
            task_id: "task-1",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"clientKey": "CAP-TEST", "taskId": "task-1"})
        );
    }

    #[test]
    fn nonzero_error_id_maps_to_api_error() {
        let response: ApiResponse = serde_json::from_value(json!({
            "errorId": 1,
            "errorCode": "ERROR_KEY_DENIED_ACCESS",
            "errorDescription": "invalid api key",
        }))
        .unwrap();
        match response.into_result().unwrap_err() {
            SolverError::Api {
                error_id,
                code,
                description,
            } => {
                assert_eq!(error_id, 1);
                assert_eq!(code, "ERROR_KEY_DENIED_ACCESS");
                assert_eq!(description, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_error_id_passes_through_with_payload() {
        let response: ApiResponse = serde_json::from_value(json!({
            "errorId": 0,
            "taskId": "task-7",
            "status": "processing",
        }))
        .unwrap();
        let response = response.into_result().unwrap();
        assert_eq!(response.task_id.as_deref(), Some("task-7"));
        assert_eq!(response.status.as_deref(), Some("processing"));
    }

    #[test]
    fn ready_solution_shape_parses() {
        let response: ApiResponse = serde_json::from_value(json!({
            "errorId": 0,
            "status": "ready",
            "solution": {"cookie": "aws-waf-token=abc"},
        }))
        .unwrap();
        let cookie = response.solution.unwrap()["cookie"].as_str().unwrap().to_string();
        assert_eq!(cookie, "aws-waf-token=abc");
    }

    #[test]
    fn encode_image_round_trips_file_bytes() {
        use base64::Engine as _;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captcha.png");
        std::fs::write(&path, b"not-a-real-png").unwrap();

        let encoded = encode_image(&path).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, b"not-a-real-png");
    }

    #[test]
    fn encode_image_reports_the_missing_path() {
        let err = encode_image(Path::new("/nonexistent/captcha.png")).unwrap_err();
        match err {
            SolverError::Image { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/captcha.png"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
