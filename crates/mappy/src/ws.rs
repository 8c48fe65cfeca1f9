//! Outbound websocket publisher.
//!
//! Implements the engine's [`Publisher`] seam over `tokio-tungstenite`. A
//! background task owns the connection: it dials the consumer, forwards
//! queued outbound frames, logs inbound traffic, and redials on a fixed
//! delay after any failure. Sends are fire-and-forget; anything queued while
//! the link is down is dropped, matching the engine's best-effort contract.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use mappy_core::Publisher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Delay between reconnect attempts after a failed dial or a dropped link.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Websocket-backed publisher with automatic reconnect.
pub struct WsPublisher {
    outbound_tx: mpsc::UnboundedSender<String>,
    connected: Arc<AtomicBool>,
}

impl WsPublisher {
    /// Creates the publisher and spawns its connection task. The task keeps
    /// dialing `url` until the daemon shuts down.
    pub fn spawn(url: String) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));
        tokio::spawn(connection_task(url, outbound_rx, Arc::clone(&connected)));
        Self {
            outbound_tx,
            connected,
        }
    }
}

#[async_trait]
impl Publisher for WsPublisher {
    async fn send(&self, text: &str) {
        // Queue for the connection task; a closed channel means shutdown.
        if self.outbound_tx.send(text.to_string()).is_err() {
            debug!("Publisher is shut down, dropping message: {text}");
        }
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Owns the websocket for the life of the daemon: connect, pump, reconnect.
async fn connection_task(
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    connected: Arc<AtomicBool>,
) {
    loop {
        info!("Connecting to the consumer websocket: {}", url);
        match connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                info!("Connection to the consumer established");
                connected.store(true, Ordering::SeqCst);
                let (mut sink, mut source) = stream.split();

                loop {
                    tokio::select! {
                        outgoing = outbound_rx.recv() => {
                            match outgoing {
                                Some(text) => {
                                    if let Err(e) = sink.send(Message::Text(text.into())).await {
                                        warn!("Websocket send failed: {e}");
                                        break;
                                    }
                                }
                                None => {
                                    // All senders dropped: daemon shutdown.
                                    let _ = sink.send(Message::Close(None)).await;
                                    connected.store(false, Ordering::SeqCst);
                                    return;
                                }
                            }
                        }
                        incoming = source.next() => {
                            match incoming {
                                Some(Ok(Message::Text(text))) => {
                                    info!("WS message: {}", text.as_str());
                                }
                                Some(Ok(_)) => {}
                                Some(Err(e)) => {
                                    warn!("Websocket read failed: {e}");
                                    break;
                                }
                                None => {
                                    warn!("Consumer closed the connection");
                                    break;
                                }
                            }
                        }
                    }
                }

                connected.store(false, Ordering::SeqCst);
            }
            Err(e) => warn!("Could not reach the consumer websocket: {e}"),
        }

        // Anything queued while the link was down is stale; drop it.
        loop {
            match outbound_rx.try_recv() {
                Ok(dropped) => debug!("Dropping message queued while disconnected: {dropped}"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }

        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio::time::timeout;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_publisher_delivers_frames_to_consumer() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("websocket handshake");
            let frame = ws.next().await.expect("one frame").expect("frame ok");
            match frame {
                Message::Text(text) => text.as_str().to_string(),
                other => panic!("expected a text frame, got {other:?}"),
            }
        });

        let publisher = WsPublisher::spawn(format!("ws://{addr}/socket"));

        // Wait for the background task to finish the handshake.
        timeout(Duration::from_secs(5), async {
            while !publisher.connected() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("publisher should connect");

        publisher.send("PLAYER_NAME::Warrior").await;

        let received = timeout(Duration::from_secs(5), server)
            .await
            .expect("consumer should receive the frame")
            .expect("server task");
        assert_eq!(received, "PLAYER_NAME::Warrior");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_without_consumer_does_not_panic() {
        // Nothing listening on this port; the task just keeps retrying.
        let publisher = WsPublisher::spawn("ws://127.0.0.1:9/socket".to_string());
        assert!(!publisher.connected());
        publisher.send("PLAYER_MAP_ID::100").await;
    }
}
