//! Request/response correlation over the DevTools transport.
//!
//! # Message flow
//!
//! 1. A caller invokes [`ConnectionLike::send_command`]
//! 2. The connection allocates a unique id and registers a oneshot sender
//! 3. The request is serialized and handed to the transport
//! 4. The caller awaits the oneshot receiver
//! 5. The reader loop correlates the response by id and completes the oneshot
//!
//! Events are unsolicited and carry no id; the launch-and-navigate sequence
//! needs none of them, so they are logged and dropped here.

use crate::error::{Error, Result};
use crate::transport::{TransportReceiver, TransportSender};
use extlaunch_protocol::{CdpIncoming, CdpRequest};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::oneshot;
use tracing::{trace, warn};

/// Interface API objects use to talk to the browser.
///
/// Splitting this from the concrete [`Connection`] lets the API layer be
/// exercised against a recording implementation in tests.
pub trait ConnectionLike: Send + Sync {
    /// Send a command and await its correlated response payload.
    fn send_command(
        &self,
        method: &'static str,
        session_id: Option<&str>,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + '_>>;
}

type PendingMap = Mutex<HashMap<u32, oneshot::Sender<Result<Value>>>>;

/// Live connection to a browser's DevTools endpoint.
pub struct Connection {
    sender: TransportSender,
    next_id: AtomicU32,
    pending: Arc<PendingMap>,
    reader: tokio::task::JoinHandle<()>,
}

impl Connection {
    /// Wrap a connected transport and start the reader loop.
    pub fn new(sender: TransportSender, mut receiver: TransportReceiver) -> Self {
        let pending: Arc<PendingMap> = Arc::new(Mutex::new(HashMap::new()));
        let reader_pending = Arc::clone(&pending);
        let reader = tokio::spawn(async move {
            while let Some(text) = receiver.receive().await {
                dispatch(&reader_pending, &text);
            }
            // Transport is gone; fail everything still waiting.
            for (_, tx) in reader_pending.lock().drain() {
                let _ = tx.send(Err(Error::ConnectionClosed));
            }
        });

        Self {
            sender,
            next_id: AtomicU32::new(1),
            pending,
            reader,
        }
    }
}

impl ConnectionLike for Connection {
    fn send_command(
        &self,
        method: &'static str,
        session_id: Option<&str>,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + '_>> {
        let session_id = session_id.map(str::to_string);
        Box::pin(async move {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let (tx, rx) = oneshot::channel();
            self.pending.lock().insert(id, tx);

            let request = CdpRequest {
                id,
                method: method.to_string(),
                session_id,
                params,
            };
            let text = serde_json::to_string(&request)?;
            trace!(target: "extlaunch", %method, id, "send command");

            if let Err(e) = self.sender.send(text) {
                self.pending.lock().remove(&id);
                return Err(e);
            }

            rx.await.map_err(|_| Error::ConnectionClosed)?
        })
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

fn dispatch(pending: &PendingMap, text: &str) {
    match serde_json::from_str::<CdpIncoming>(text) {
        Ok(CdpIncoming::Response(response)) => {
            let Some(tx) = pending.lock().remove(&response.id) else {
                warn!(target: "extlaunch", id = response.id, "response for unknown request id");
                return;
            };
            let outcome = match response.error {
                Some(error) => Err(Error::Cdp {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(response.result.unwrap_or(Value::Null)),
            };
            let _ = tx.send(outcome);
        }
        Ok(CdpIncoming::Event(event)) => {
            trace!(target: "extlaunch", method = %event.method, "event");
        }
        Err(e) => {
            warn!(target: "extlaunch", error = %e, "unparseable message from browser");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::loopback;
    use serde_json::json;

    /// Echo peer that answers every request with a canned result.
    fn fake_browser(
        mut sent: tokio::sync::mpsc::UnboundedReceiver<String>,
        incoming: tokio::sync::mpsc::UnboundedSender<String>,
        reply: impl Fn(&CdpRequest) -> Value + Send + 'static,
    ) {
        tokio::spawn(async move {
            while let Some(text) = sent.recv().await {
                let request: serde_json::Value = serde_json::from_str(&text).unwrap();
                let id = request["id"].as_u64().unwrap() as u32;
                let parsed = CdpRequest {
                    id,
                    method: request["method"].as_str().unwrap().to_string(),
                    session_id: request["sessionId"].as_str().map(str::to_string),
                    params: request.get("params").cloned().unwrap_or(Value::Null),
                };
                let body = reply(&parsed);
                let _ = incoming.send(body.to_string());
            }
        });
    }

    #[tokio::test]
    async fn responses_are_correlated_by_id() {
        let (sender, receiver, sent, incoming) = loopback();
        fake_browser(sent, incoming, |request| {
            json!({"id": request.id, "result": {"echo": request.method}})
        });
        let connection = Connection::new(sender, receiver);

        let first = connection
            .send_command("Browser.getVersion", None, Value::Null)
            .await
            .unwrap();
        assert_eq!(first["echo"], "Browser.getVersion");

        let second = connection
            .send_command("Target.createTarget", None, json!({"url": "about:blank"}))
            .await
            .unwrap();
        assert_eq!(second["echo"], "Target.createTarget");
    }

    #[tokio::test]
    async fn error_responses_become_cdp_errors() {
        let (sender, receiver, sent, incoming) = loopback();
        fake_browser(sent, incoming, |request| {
            json!({"id": request.id, "error": {"code": -32000, "message": "Not allowed"}})
        });
        let connection = Connection::new(sender, receiver);

        let err = connection
            .send_command("Target.createTarget", None, json!({"url": "about:blank"}))
            .await
            .unwrap_err();
        match err {
            Error::Cdp { code, message } => {
                assert_eq!(code, -32000);
                assert_eq!(message, "Not allowed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_id_is_forwarded_on_the_wire() {
        let (sender, receiver, sent, incoming) = loopback();
        fake_browser(sent, incoming, |request| {
            json!({
                "id": request.id,
                "result": {"sawSession": request.session_id.clone().unwrap_or_default()},
            })
        });
        let connection = Connection::new(sender, receiver);

        let result = connection
            .send_command(
                "Page.navigate",
                Some("session-9"),
                json!({"url": "https://example.com"}),
            )
            .await
            .unwrap();
        assert_eq!(result["sawSession"], "session-9");
    }

    #[tokio::test]
    async fn closed_transport_fails_pending_requests() {
        let (sender, receiver, sent, incoming) = loopback();
        let connection = Connection::new(sender, receiver);

        // Close the browser side without answering.
        drop(sent);
        drop(incoming);

        let err = connection
            .send_command("Browser.getVersion", None, Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
    }

    #[tokio::test]
    async fn events_and_junk_do_not_break_the_reader() {
        let (sender, receiver, sent, incoming) = loopback();
        incoming
            .send(json!({"method": "Target.targetCreated", "params": {}}).to_string())
            .unwrap();
        incoming.send("not even json".to_string()).unwrap();
        fake_browser(sent, incoming, |request| {
            json!({"id": request.id, "result": {}})
        });
        let connection = Connection::new(sender, receiver);

        let result = connection
            .send_command("Browser.close", None, Value::Null)
            .await;
        assert!(result.is_ok());
    }
}
