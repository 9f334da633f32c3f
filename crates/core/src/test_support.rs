//! Recording [`ConnectionLike`] implementation for exercising API objects
//! without a browser.

use extlaunch_runtime::connection::ConnectionLike;
use extlaunch_runtime::{Error, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// One recorded `send_command` invocation.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub session_id: Option<String>,
    pub params: Value,
}

/// Records every command and answers from a canned script.
///
/// Methods with no scripted response resolve to `null`, which is enough for
/// commands whose result is ignored (`Browser.close`).
pub(crate) struct MockConnection {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<&'static str, Value>>,
    failures: Mutex<HashMap<&'static str, (i64, String)>>,
}

impl MockConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
        })
    }

    /// Script a successful result for `method`.
    pub fn respond(&self, method: &'static str, result: Value) {
        self.responses.lock().insert(method, result);
    }

    /// Script a browser-side rejection for `method`.
    pub fn fail(&self, method: &'static str, code: i64, message: &str) {
        self.failures
            .lock()
            .insert(method, (code, message.to_string()));
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Just the method names, in order.
    pub fn methods(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|call| call.method).collect()
    }
}

impl ConnectionLike for MockConnection {
    fn send_command(
        &self,
        method: &'static str,
        session_id: Option<&str>,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + '_>> {
        self.calls.lock().push(RecordedCall {
            method,
            session_id: session_id.map(str::to_string),
            params,
        });

        let outcome = if let Some((code, message)) = self.failures.lock().get(method).cloned() {
            Err(Error::Cdp { code, message })
        } else {
            Ok(self
                .responses
                .lock()
                .get(method)
                .cloned()
                .unwrap_or(Value::Null))
        };

        Box::pin(async move { outcome })
    }
}
