//! # mappy_core - Game State Polling Engine
//!
//! The engine behind the mappy telemetry daemon. It polls a live game
//! client's in-memory state on a fixed cadence and derives a small stream of
//! events for a remote map consumer: who the player is, which zone they are
//! in, and where they are standing.
//!
//! ## Design Philosophy
//!
//! The engine contains **no memory parsing and no transport code**, only the
//! temporal logic that decides when to read, what a read means, and what to
//! emit:
//!
//! * **PollScheduler** - owns all timing: the startup delay, the fast poll
//!   cadence, the 1-second settle cadence, pause/resume, and shutdown
//! * **ZoneTracker** - classifies each snapshot as same-zone or transition
//!   and counts down the post-transition settle window
//! * **EventEmitter** - maps decisions onto the `KEY::value` wire protocol
//!   and applies suppression rules
//!
//! Memory reading sits behind the [`ActorProvider`] trait and the outbound
//! socket behind the [`Publisher`] trait; both are supplied by the embedding
//! application.
//!
//! ## The settle window
//!
//! Right after a zone transition the game's memory is mid-reinitialization
//! and reads return garbage. Every detected transition therefore opens a
//! fixed real-time suppression window (default 3 seconds, counted on its
//! own 1-second cadence) during which nothing is emitted. The window is a
//! debounce, not a precise signal: consumers should treat it as "at least N
//! seconds of silence", never an exact boundary.
//!
//! ## Concurrency Model
//!
//! The whole pipeline runs on a single spawned task. Tracker and emitter
//! state are owned by that task, ticks are serialized by construction, and
//! an overrunning tick defers the next one instead of running concurrently.
//! `stop()` joins the task before returning, so no tick fires afterwards.

// Re-export core types for easy access
pub use config::ScannerConfig;
pub use emitter::EventEmitter;
pub use error::ScannerError;
pub use provider::{ActorProvider, ActorSnapshot, Position, ProviderError};
pub use publisher::Publisher;
pub use scheduler::PollScheduler;
pub use tracker::{Decision, TrackerMode, ZoneTracker};

// Public module declarations
pub mod config;
pub mod emitter;
pub mod error;
pub mod provider;
pub mod publisher;
pub mod scheduler;
pub mod tracker;
pub mod wire;

// Integration-style tests for the full pipeline
mod tests;
