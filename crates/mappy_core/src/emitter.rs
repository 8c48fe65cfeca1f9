//! Turns tracker decisions into outbound wire messages.
//!
//! The emitter owns the content-based suppression rules: identity is
//! announced exactly once, zone changes never share a tick with a position
//! update, and nothing is ever sent for a zone id of 0.

use crate::provider::ActorSnapshot;
use crate::publisher::Publisher;
use crate::tracker::Decision;
use crate::wire;
use std::sync::Arc;
use tracing::{debug, info};

/// Formats state into wire messages and forwards them to the publisher.
pub struct EventEmitter {
    publisher: Arc<dyn Publisher>,
    identity_announced: bool,
}

impl EventEmitter {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self {
            publisher,
            identity_announced: false,
        }
    }

    /// Announces the tracked character's identity if it has not been
    /// announced yet. Called by the scheduler on the initial snapshot read
    /// and again from [`handle`](EventEmitter::handle) as a fallback when
    /// that initial read failed.
    pub async fn announce_identity(&mut self, snapshot: &ActorSnapshot) {
        if self.identity_announced {
            return;
        }
        info!("Character detected: {}", snapshot.name);
        self.publish(wire::player_name(&snapshot.name)).await;
        self.identity_announced = true;
    }

    /// Emits zero or more messages for one decision and its originating
    /// snapshot.
    pub async fn handle(&mut self, decision: Decision, snapshot: &ActorSnapshot) {
        // First successful poll announces identity regardless of decision.
        self.announce_identity(snapshot).await;

        match decision {
            Decision::ZoneChanged { previous, current } => {
                info!(
                    "Zone change detected :: {} --> {} :: scanning paused",
                    previous, current
                );
                if current == 0 {
                    info!(
                        "Zone id read as 0, map is not scannable; \
                         scanning resumes once a non-zero zone is read"
                    );
                }
                // Exactly one zone-change ping, never a position in the
                // same tick. The id 0 case is deliberately still sent.
                self.publish(wire::player_map_id(current)).await;
            }
            Decision::NoChange => {
                if snapshot.zone_id == 0 {
                    // Invalid zone, nothing meaningful to report.
                    return;
                }
                self.publish(wire::player_position(&snapshot.position, snapshot.heading_radians))
                    .await;
            }
            Decision::Ignored { seconds_remaining } => {
                // Diagnostic only, not part of the wire contract.
                debug!("Scanning paused for {} seconds...", seconds_remaining);
            }
            Decision::Resumed => {
                info!(
                    "Zone timeout complete :: scanning map id {}",
                    snapshot.zone_id
                );
            }
        }
    }

    /// Whether the identity message has been sent.
    pub fn identity_announced(&self) -> bool {
        self.identity_announced
    }

    async fn publish(&self, message: String) {
        if !self.publisher.connected() {
            debug!("Transport unavailable, dropping message: {}", message);
            return;
        }
        self.publisher.send(&message).await;
    }
}
