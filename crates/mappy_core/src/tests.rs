
// Include tests
#[cfg(test)]
mod tests {
    use crate::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Provider double that replays a fixed script of reads. `None` entries
    /// report `NotAttached`; once the script runs out the last entry repeats
    /// forever.
    struct ScriptedProvider {
        script: Mutex<(Vec<Option<ActorSnapshot>>, usize)>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Option<ActorSnapshot>>) -> Self {
            assert!(!script.is_empty(), "script needs at least one step");
            Self {
                script: Mutex::new((script, 0)),
            }
        }
    }

    #[async_trait]
    impl ActorProvider for ScriptedProvider {
        async fn local_actor(&self) -> Result<ActorSnapshot, ProviderError> {
            let mut guard = self.script.lock().unwrap();
            let (steps, cursor) = &mut *guard;
            let step = steps[(*cursor).min(steps.len() - 1)].clone();
            *cursor += 1;
            step.ok_or_else(|| ProviderError::NotAttached("scripted detach".to_string()))
        }
    }

    /// Publisher double that records every sent frame.
    struct RecordingPublisher {
        messages: Mutex<Vec<String>>,
        connected: AtomicBool,
    }

    impl RecordingPublisher {
        fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
                connected: AtomicBool::new(true),
            }
        }

        fn disconnected() -> Self {
            let publisher = Self::new();
            publisher.connected.store(false, Ordering::SeqCst);
            publisher
        }

        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn send(&self, text: &str) {
            self.messages.lock().unwrap().push(text.to_string());
        }

        fn connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }
    }

    fn snapshot(zone_id: u32) -> ActorSnapshot {
        ActorSnapshot {
            name: "Warrior".to_string(),
            zone_id,
            position: Position::new(100.0, 50.0, 0.0),
            heading_radians: std::f64::consts::PI,
        }
    }

    fn config() -> ScannerConfig {
        ScannerConfig {
            startup_delay_ms: 1000,
            poll_interval_ms: 50,
            zone_settle_seconds: 3,
        }
    }

    // ---- emitter rules -------------------------------------------------

    #[tokio::test]
    async fn test_identity_announced_once_then_positions() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut emitter = EventEmitter::new(publisher.clone());

        for _ in 0..3 {
            emitter.handle(Decision::NoChange, &snapshot(100)).await;
        }

        let messages = publisher.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], "PLAYER_NAME::Warrior");
        for message in &messages[1..] {
            assert_eq!(message, "PLAYER_POSITION::100,50,0,0");
        }
        assert!(emitter.identity_announced());
    }

    #[tokio::test]
    async fn test_zone_change_emits_single_map_id_and_no_position() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut emitter = EventEmitter::new(publisher.clone());
        emitter.announce_identity(&snapshot(100)).await;

        emitter
            .handle(
                Decision::ZoneChanged {
                    previous: 100,
                    current: 105,
                },
                &snapshot(105),
            )
            .await;

        let messages = publisher.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], "PLAYER_MAP_ID::105");
    }

    #[tokio::test]
    async fn test_map_id_zero_ping_is_preserved() {
        // Deployed consumers receive the PLAYER_MAP_ID::0 ping today, so
        // the load-screen transition keeps sending it.
        let publisher = Arc::new(RecordingPublisher::new());
        let mut emitter = EventEmitter::new(publisher.clone());
        emitter.announce_identity(&snapshot(100)).await;

        emitter
            .handle(
                Decision::ZoneChanged {
                    previous: 100,
                    current: 0,
                },
                &snapshot(0),
            )
            .await;

        assert_eq!(publisher.messages()[1], "PLAYER_MAP_ID::0");
    }

    #[tokio::test]
    async fn test_invalid_zone_and_settle_ticks_emit_nothing() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut emitter = EventEmitter::new(publisher.clone());
        emitter.announce_identity(&snapshot(100)).await;

        emitter.handle(Decision::NoChange, &snapshot(0)).await;
        emitter
            .handle(Decision::Ignored { seconds_remaining: 2 }, &snapshot(100))
            .await;
        emitter.handle(Decision::Resumed, &snapshot(100)).await;

        // Identity only; suppression swallowed everything else.
        assert_eq!(publisher.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_disconnected_transport_drops_sends() {
        let publisher = Arc::new(RecordingPublisher::disconnected());
        let mut emitter = EventEmitter::new(publisher.clone());

        emitter.handle(Decision::NoChange, &snapshot(100)).await;

        assert!(publisher.messages().is_empty());
    }

    // ---- full pipeline -------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_startup_zone_change_and_resume() {
        // Initial read seeds zone 100, three polls stay put, then the
        // player zones into 105 and stays there.
        let mut script = vec![Some(snapshot(100)); 4];
        script.push(Some(snapshot(105)));
        let provider = Arc::new(ScriptedProvider::new(script));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        scheduler.start().await.expect("scheduler should start");

        // Startup delay (1s) + 4 polls (50ms) + settle window (3 ticks at
        // 1s plus the resume tick) + a couple of resumed polls.
        tokio::time::sleep(Duration::from_millis(5325)).await;
        scheduler.stop().await;

        let messages = publisher.messages();
        assert_eq!(messages[0], "PLAYER_NAME::Warrior");

        let map_ids: Vec<&String> = messages
            .iter()
            .filter(|m| m.starts_with("PLAYER_MAP_ID::"))
            .collect();
        assert_eq!(map_ids, vec!["PLAYER_MAP_ID::105"]);

        // Three steady polls before the transition, each one position.
        let change_index = messages
            .iter()
            .position(|m| m == "PLAYER_MAP_ID::105")
            .unwrap();
        let before: Vec<&String> = messages[1..change_index].iter().collect();
        assert_eq!(before.len(), 3);
        assert!(before.iter().all(|m| m.starts_with("PLAYER_POSITION::")));

        // Positions resume after the settle window.
        let after = &messages[change_index + 1..];
        assert!(!after.is_empty());
        assert!(after.iter().all(|m| m.starts_with("PLAYER_POSITION::")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_process_is_retried_until_it_attaches() {
        // Initial read and the first poll fail; the scanner keeps running
        // and picks the player up on the next tick.
        let script = vec![None, None, Some(snapshot(100))];
        let provider = Arc::new(ScriptedProvider::new(script));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        scheduler.start().await.expect("scheduler should start");
        tokio::time::sleep(Duration::from_millis(1125)).await;
        scheduler.stop().await;

        let messages = publisher.messages();
        // Identity arrives late, on the first successful poll, followed by
        // the unseeded zone registering as a transition.
        assert_eq!(messages[0], "PLAYER_NAME::Warrior");
        assert_eq!(messages[1], "PLAYER_MAP_ID::100");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume_are_idempotent() {
        let provider = Arc::new(ScriptedProvider::new(vec![Some(snapshot(100))]));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        // resume() with no prior pause() is a no-op.
        scheduler.resume();
        assert!(!scheduler.is_paused());

        scheduler.start().await.expect("scheduler should start");
        tokio::time::sleep(Duration::from_millis(1225)).await;

        // Double pause is the same as one pause.
        scheduler.pause();
        scheduler.pause();
        assert!(scheduler.is_paused());
        let while_paused = publisher.messages().len();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(publisher.messages().len(), while_paused);

        scheduler.resume();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(publisher.messages().len() > while_paused);

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_not_reusable() {
        let provider = Arc::new(ScriptedProvider::new(vec![Some(snapshot(100))]));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        scheduler.start().await.expect("first start should succeed");
        assert!(matches!(
            scheduler.start().await,
            Err(ScannerError::AlreadyStarted)
        ));

        scheduler.stop().await;
        assert!(matches!(scheduler.start().await, Err(ScannerError::Stopped)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop_returns() {
        let provider = Arc::new(ScriptedProvider::new(vec![Some(snapshot(100))]));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        scheduler.start().await.expect("scheduler should start");
        tokio::time::sleep(Duration::from_millis(1525)).await;
        scheduler.stop().await;

        let at_stop = publisher.messages().len();
        assert!(at_stop > 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(publisher.messages().len(), at_stop);

        // Stopping again is harmless.
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_start_is_terminal() {
        let provider = Arc::new(ScriptedProvider::new(vec![Some(snapshot(100))]));
        let publisher = Arc::new(RecordingPublisher::new());
        let scheduler = PollScheduler::new(config(), provider, publisher.clone());

        scheduler.stop().await;
        assert!(matches!(scheduler.start().await, Err(ScannerError::Stopped)));
        assert!(publisher.messages().is_empty());
    }
}
