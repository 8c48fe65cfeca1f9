//! The outbound transport seam.
//!
//! The engine only ever pushes text frames at a [`Publisher`]; connection
//! handshakes, retries and inbound traffic are the transport's own business.

use async_trait::async_trait;

/// Outbound message channel for wire messages.
///
/// Sends are fire-and-forget: there is no acknowledgement and the engine
/// never retries. When [`connected`](Publisher::connected) is false the
/// emitter drops the message instead of calling `send`.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Sends one text frame, best-effort.
    async fn send(&self, text: &str);

    /// Whether the underlying transport currently has a live connection.
    fn connected(&self) -> bool;
}
