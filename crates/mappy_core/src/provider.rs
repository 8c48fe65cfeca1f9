//! Actor snapshot values and the memory-reader seam.
//!
//! The engine never touches game memory itself. It asks an [`ActorProvider`]
//! for a fresh [`ActorSnapshot`] once per tick and treats everything behind
//! that trait as opaque.

use async_trait::async_trait;

/// A 3D world coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A single point-in-time read of the locally-controlled actor.
///
/// Produced fresh on every poll and never mutated; the snapshot has no
/// identity beyond its fields. A `zone_id` of 0 means the read happened
/// mid-load and the rest of the snapshot is not meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSnapshot {
    /// Character name as read from memory
    pub name: String,

    /// Numeric zone/map id (0 = unknown or invalid)
    pub zone_id: u32,

    /// World position of the actor
    pub position: Position,

    /// Raw heading in signed radians, 0 facing the reference direction
    pub heading_radians: f64,
}

/// Errors the memory-reading subsystem can surface to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The host game process is not running or not hooked.
    /// Non-fatal: the scheduler retries on every tick until it succeeds.
    #[error("game process not attached: {0}")]
    NotAttached(String),
}

/// Source of actor snapshots, implemented by the memory-reading subsystem.
///
/// Implementations must return within well under one poll interval; a read
/// that cannot complete reports [`ProviderError::NotAttached`] rather than
/// blocking the tick.
#[async_trait]
pub trait ActorProvider: Send + Sync {
    /// Reads a fresh snapshot of the locally-controlled actor.
    async fn local_actor(&self) -> Result<ActorSnapshot, ProviderError>;
}
