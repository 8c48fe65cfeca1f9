//! Zone transition detection and the post-transition settle window.
//!
//! Immediately after a zone transition the game's memory for position and
//! surrounding actors is not yet reinitialized, and reading it produces
//! garbage. [`ZoneTracker`] therefore classifies every fresh snapshot into a
//! [`Decision`] and gates the window after each transition with a fixed
//! countdown. The tracker holds no timers and performs no I/O; it is a pure
//! decision function over its own state, driven once per scheduler tick.

use crate::provider::ActorSnapshot;

/// Tracker evaluation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerMode {
    /// No zone is currently tracked (startup, or settled out of a load screen)
    Idle,
    /// A non-zero zone is tracked and polling normally
    Armed,
    /// Inside the post-transition settle window
    Settling,
}

/// Outcome of observing one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Same zone as before; the caller may emit a position update
    NoChange,
    /// The actor moved to a different zone; `current` may be 0 when the
    /// read caught a load screen
    ZoneChanged { previous: u32, current: u32 },
    /// Inside the settle window; nothing may be emitted. The countdown value
    /// is for diagnostics only.
    Ignored { seconds_remaining: u32 },
    /// The settle window just finished. Not a zone change: the caller
    /// resumes the normal poll cadence and re-evaluates on the next tick.
    Resumed,
}

/// Classifies snapshots as "same zone" or "zone change" and counts down the
/// settle window after each transition.
///
/// State is owned exclusively by this struct and mutated only through
/// [`observe`](ZoneTracker::observe) and [`seed`](ZoneTracker::seed); the
/// scheduler guarantees those are never called concurrently.
#[derive(Debug)]
pub struct ZoneTracker {
    /// Last known good zone id (0 = none yet). A load-screen read never
    /// overwrites this.
    current_zone_id: u32,
    mode: TrackerMode,
    /// Remaining settle ticks. May sit at exactly 0 for one final Settling
    /// tick before the tracker reports `Resumed`.
    settle_remaining: u32,
    /// Configured settle window length, restored on every transition
    settle_seconds: u32,
}

impl ZoneTracker {
    /// Creates a tracker with no known zone.
    pub fn new(settle_seconds: u32) -> Self {
        Self {
            current_zone_id: 0,
            mode: TrackerMode::Idle,
            settle_remaining: 0,
            settle_seconds,
        }
    }

    /// Installs the initial snapshot's zone without producing a transition.
    ///
    /// Used once by the scheduler after the startup delay so that the first
    /// regular tick in an already-loaded zone reads as `NoChange` rather
    /// than a spurious zone change. A mid-load zero id leaves the tracker
    /// unseeded.
    pub fn seed(&mut self, zone_id: u32) {
        if zone_id > 0 {
            self.current_zone_id = zone_id;
            self.mode = TrackerMode::Armed;
        }
    }

    /// Classifies one fresh snapshot.
    pub fn observe(&mut self, snapshot: &ActorSnapshot) -> Decision {
        if self.mode == TrackerMode::Settling {
            return self.tick_settle();
        }

        let observed = snapshot.zone_id;
        if observed == self.current_zone_id {
            return Decision::NoChange;
        }

        // Transition. A zero id means the read caught a load screen: the
        // consumer still gets the ping, but the tracked id is preserved so
        // the real zone registers as a fresh transition once readable.
        let previous = self.current_zone_id;
        if observed > 0 {
            self.current_zone_id = observed;
        }
        self.mode = TrackerMode::Settling;
        self.settle_remaining = self.settle_seconds;
        Decision::ZoneChanged {
            previous,
            current: observed,
        }
    }

    /// One settle-cadence tick: count down, then report `Resumed` on the
    /// tick after the count reaches zero.
    fn tick_settle(&mut self) -> Decision {
        if self.settle_remaining > 0 {
            let seconds_remaining = self.settle_remaining;
            self.settle_remaining -= 1;
            return Decision::Ignored { seconds_remaining };
        }

        self.mode = if self.current_zone_id > 0 {
            TrackerMode::Armed
        } else {
            TrackerMode::Idle
        };
        Decision::Resumed
    }

    /// Last known good zone id (0 = none yet).
    pub fn current_zone_id(&self) -> u32 {
        self.current_zone_id
    }

    /// Current evaluation mode.
    pub fn mode(&self) -> TrackerMode {
        self.mode
    }

    /// Whether the tracker is inside a settle window.
    pub fn is_settling(&self) -> bool {
        self.mode == TrackerMode::Settling
    }
}
