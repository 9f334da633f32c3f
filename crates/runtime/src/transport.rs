//! WebSocket transport to the browser's DevTools endpoint.
//!
//! The socket is split into a writer task fed by an unbounded channel and a
//! reader task that forwards text frames. Both halves stop as soon as the
//! peer goes away; the connection layer observes that as a closed channel.

use crate::error::{Error, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

/// Sending half of the transport.
#[derive(Debug, Clone)]
pub struct TransportSender {
    tx: mpsc::UnboundedSender<String>,
}

impl TransportSender {
    /// Queue a text frame for delivery.
    pub fn send(&self, text: String) -> Result<()> {
        self.tx.send(text).map_err(|_| Error::ConnectionClosed)
    }
}

/// Receiving half of the transport.
#[derive(Debug)]
pub struct TransportReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

impl TransportReceiver {
    /// Next incoming text frame, or `None` once the socket is closed.
    pub async fn receive(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

/// Connect to a DevTools WebSocket endpoint.
///
/// # Errors
///
/// Returns `Error::ConnectionFailed` if the WebSocket handshake fails.
pub async fn connect(ws_url: &str) -> Result<(TransportSender, TransportReceiver)> {
    let (stream, _response) = connect_async(ws_url)
        .await
        .map_err(|e| Error::ConnectionFailed(format!("websocket connect to {ws_url} failed: {e}")))?;
    let (mut sink, mut source) = stream.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(text) = out_rx.recv().await {
            if let Err(e) = sink.send(Message::Text(text)).await {
                debug!(target: "extlaunch", error = %e, "websocket send failed; writer stopping");
                break;
            }
        }
        let _ = sink.close().await;
    });

    tokio::spawn(async move {
        while let Some(message) = source.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    if in_tx.send(text).is_err() {
                        break;
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!(target: "extlaunch", error = %e, "websocket receive failed; reader stopping");
                    break;
                }
            }
        }
    });

    Ok((
        TransportSender { tx: out_tx },
        TransportReceiver { rx: in_rx },
    ))
}

/// In-memory transport pair for exercising the connection without a socket.
///
/// Returns the connection-facing halves plus the "browser side": a receiver
/// of everything sent and a sender that injects incoming frames.
pub fn loopback() -> (
    TransportSender,
    TransportReceiver,
    mpsc::UnboundedReceiver<String>,
    mpsc::UnboundedSender<String>,
) {
    let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<String>();
    (
        TransportSender { tx: out_tx },
        TransportReceiver { rx: in_rx },
        out_rx,
        in_tx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loopback_delivers_in_both_directions() {
        let (sender, mut receiver, mut sent, incoming) = loopback();

        sender.send("outgoing".to_string()).unwrap();
        assert_eq!(sent.recv().await.as_deref(), Some("outgoing"));

        incoming.send("incoming".to_string()).unwrap();
        assert_eq!(receiver.receive().await.as_deref(), Some("incoming"));
    }

    #[tokio::test]
    async fn send_after_peer_drop_reports_closed() {
        let (sender, _receiver, sent, _incoming) = loopback();
        drop(sent);
        let err = sender.send("late".to_string()).unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
    }

    #[tokio::test]
    async fn connect_to_unreachable_endpoint_fails() {
        // Port 9 (discard) is near-universally closed for websockets.
        let result = connect("ws://127.0.0.1:9/devtools/browser/none").await;
        assert!(matches!(result, Err(Error::ConnectionFailed(_))));
    }
}
