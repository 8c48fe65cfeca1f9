//! The poll scheduler: owner of all timing in the engine.
//!
//! Rather than chaining timer callbacks (a one-shot startup delay starting a
//! fast poll loop, with a third timer counting down zone settles) through
//! shared mutable flags, the whole pipeline is one spawned task driving an
//! explicit state machine:
//!
//! ```text
//! Created -- start() --> Delaying -- delay elapsed --> Running <--> Paused
//!     \________________________ stop() ____________________/
//!                                 |
//!                               Stopped (terminal)
//! ```
//!
//! The single task owns the [`ZoneTracker`] and [`EventEmitter`] outright,
//! so ticks are serialized by construction and no locking is needed around
//! tracker state. A tick that overruns its interval defers the next one
//! rather than running it concurrently.

use crate::config::ScannerConfig;
use crate::emitter::EventEmitter;
use crate::error::ScannerError;
use crate::provider::ActorProvider;
use crate::publisher::Publisher;
use crate::tracker::{Decision, ZoneTracker};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Cadence of the settle countdown. Deliberately a fixed real-time debounce:
/// it does not scale with `poll_interval_ms`.
const SETTLE_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Lifecycle of the scheduler as visible to callers.
enum Lifecycle {
    Created,
    Running {
        shutdown_tx: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
    Stopped,
}

/// Drives the read-and-decide cycle on a configurable cadence.
///
/// One scheduler tracks one actor for its whole life: `start()` once,
/// `pause()`/`resume()` freely, `stop()` once. A stopped scheduler is
/// terminal and cannot be reused.
pub struct PollScheduler {
    config: ScannerConfig,
    provider: Arc<dyn ActorProvider>,
    publisher: Arc<dyn Publisher>,
    /// Logical paused flag. A paused tick returns without reading state;
    /// the underlying timer keeps running.
    paused: Arc<AtomicBool>,
    lifecycle: Mutex<Lifecycle>,
}

impl PollScheduler {
    pub fn new(
        config: ScannerConfig,
        provider: Arc<dyn ActorProvider>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            provider,
            publisher,
            paused: Arc::new(AtomicBool::new(false)),
            lifecycle: Mutex::new(Lifecycle::Created),
        }
    }

    /// Starts the polling pipeline: one-shot startup delay, an initial
    /// snapshot read that seeds the tracker and announces identity, then
    /// the repeating poll interval.
    ///
    /// # Errors
    ///
    /// Starting is not idempotent: a second `start()` while running fails
    /// fast with [`ScannerError::AlreadyStarted`], and starting after
    /// `stop()` fails with [`ScannerError::Stopped`].
    pub async fn start(&self) -> Result<(), ScannerError> {
        let mut lifecycle = self.lifecycle.lock().await;
        match &*lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running { .. } => return Err(ScannerError::AlreadyStarted),
            Lifecycle::Stopped => return Err(ScannerError::Stopped),
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(
            self.config.clone(),
            Arc::clone(&self.provider),
            Arc::clone(&self.publisher),
            Arc::clone(&self.paused),
            shutdown_rx,
        ));
        *lifecycle = Lifecycle::Running {
            shutdown_tx,
            handle,
        };
        info!(
            "Scanner starting in {}ms, polling every {}ms",
            self.config.startup_delay_ms, self.config.poll_interval_ms
        );
        Ok(())
    }

    /// Suspends tick evaluation. Idempotent.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resumes tick evaluation. Idempotent; a no-op when never paused.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Whether the logical paused flag is set.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Stops the scheduler from any state and waits for the poll task to
    /// finish. No tick fires after this returns. Safe to call from any
    /// task, including repeatedly; only the first call does work.
    pub async fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if let Lifecycle::Running {
            shutdown_tx,
            handle,
        } = std::mem::replace(&mut *lifecycle, Lifecycle::Stopped)
        {
            let _ = shutdown_tx.send(true);
            if let Err(e) = handle.await {
                warn!("Poll task ended abnormally during shutdown: {e}");
            }
            info!("Scanner stopped");
        }
    }
}

/// Which repeating cadence the loop is currently on.
#[derive(PartialEq)]
enum Cadence {
    Poll,
    Settle,
}

/// The single-task polling pipeline.
async fn poll_loop(
    config: ScannerConfig,
    provider: Arc<dyn ActorProvider>,
    publisher: Arc<dyn Publisher>,
    paused: Arc<AtomicBool>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let startup_delay = Duration::from_millis(config.startup_delay_ms);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    // Delaying: give the memory reader time to finish attaching.
    tokio::select! {
        _ = shutdown_rx.changed() => return,
        _ = tokio::time::sleep(startup_delay) => {}
    }

    let mut tracker = ZoneTracker::new(config.zone_settle_seconds);
    let mut emitter = EventEmitter::new(publisher);

    // Initial read: seed the tracked zone and announce identity. A failure
    // here is not fatal; identity goes out on the first successful tick.
    match provider.local_actor().await {
        Ok(snapshot) => {
            tracker.seed(snapshot.zone_id);
            emitter.announce_identity(&snapshot).await;
        }
        Err(e) => warn!("Initial snapshot read failed: {e}"),
    }

    let mut cadence = Cadence::Poll;
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => return,
            _ = ticker.tick() => {}
        }

        // The paused flag gates normal polling only; a running settle
        // countdown is a real-time debounce and keeps counting.
        if cadence == Cadence::Poll && paused.load(Ordering::SeqCst) {
            continue;
        }

        let snapshot = match provider.local_actor().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Tick becomes a no-op: no state mutation, no emission.
                warn!("Snapshot read failed, retrying next tick: {e}");
                continue;
            }
        };

        let decision = tracker.observe(&snapshot);
        emitter.handle(decision, &snapshot).await;

        match decision {
            Decision::ZoneChanged { .. } => {
                cadence = Cadence::Settle;
                ticker = interval_at(
                    Instant::now() + SETTLE_TICK_INTERVAL,
                    SETTLE_TICK_INTERVAL,
                );
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }
            Decision::Resumed => {
                cadence = Cadence::Poll;
                ticker = interval_at(Instant::now() + poll_interval, poll_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            }
            Decision::NoChange | Decision::Ignored { .. } => {}
        }
    }
}
