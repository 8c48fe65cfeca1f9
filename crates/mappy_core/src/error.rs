//! Error types for the polling engine.
//!
//! Nothing in the polling loop itself is fatal: a failed memory read is
//! retried on the next tick and a disconnected transport drops the send.
//! The only errors surfaced to callers are scheduler lifecycle misuse.

/// Enumeration of scheduler lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// `start()` was called while the scheduler was already running
    #[error("scanner is already running")]
    AlreadyStarted,

    /// `start()` was called after `stop()`; a stopped scheduler is terminal
    #[error("scanner has been stopped and cannot be restarted")]
    Stopped,
}
