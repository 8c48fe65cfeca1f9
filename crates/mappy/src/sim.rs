//! Simulated actor provider.
//!
//! Stands in for the real memory reader: walks a character around the map
//! at a steady speed, cycles through a configured zone list, and reports a
//! zone id of 0 for a short window between zones the way the game does
//! during a load screen. Useful for exercising the full pipeline, consumer
//! included, without a game client running.

use crate::config::SimulationSettings;
use async_trait::async_trait;
use mappy_core::{ActorProvider, ActorSnapshot, Position, ProviderError};
use rand::Rng;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// How far from the current target counts as "arrived"
const ARRIVAL_DISTANCE: f64 = 1.0;

/// Half-width of the square the walker roams
const ROAM_EXTENT: f64 = 200.0;

struct WalkState {
    position: Position,
    heading_radians: f64,
    target_x: f64,
    target_z: f64,
    zone_index: usize,
    zone_entered_at: Instant,
    loading_until: Option<Instant>,
    last_step: Instant,
}

/// Scripted walker implementing [`ActorProvider`].
pub struct SimulatedProvider {
    settings: SimulationSettings,
    state: Mutex<WalkState>,
}

impl SimulatedProvider {
    pub fn new(settings: SimulationSettings) -> Self {
        let now = Instant::now();
        Self {
            settings,
            state: Mutex::new(WalkState {
                position: Position::new(0.0, 0.0, 0.0),
                heading_radians: 0.0,
                target_x: 0.0,
                target_z: 0.0,
                zone_index: 0,
                zone_entered_at: now,
                loading_until: None,
                last_step: now,
            }),
        }
    }

    fn snapshot(&self, state: &WalkState, zone_id: u32) -> ActorSnapshot {
        ActorSnapshot {
            name: self.settings.player_name.clone(),
            zone_id,
            position: state.position,
            heading_radians: state.heading_radians,
        }
    }
}

#[async_trait]
impl ActorProvider for SimulatedProvider {
    async fn local_actor(&self) -> Result<ActorSnapshot, ProviderError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        let dt = (now - state.last_step).as_secs_f64();
        state.last_step = now;

        // Mid load screen: position is frozen and the zone id reads as 0.
        if let Some(until) = state.loading_until {
            if now < until {
                return Ok(self.snapshot(&state, 0));
            }
            state.loading_until = None;
            state.zone_entered_at = now;
        } else if now.duration_since(state.zone_entered_at)
            >= Duration::from_secs(self.settings.zone_dwell_secs)
        {
            // Time to move on: next zone after an emulated load screen.
            state.zone_index = (state.zone_index + 1) % self.settings.zone_ids.len();
            state.loading_until =
                Some(now + Duration::from_millis(self.settings.load_screen_ms));
            return Ok(self.snapshot(&state, 0));
        }

        // Wander: pick a fresh target once close to the current one, then
        // step towards it at walk speed.
        let dx = state.target_x - state.position.x;
        let dz = state.target_z - state.position.z;
        let distance = (dx * dx + dz * dz).sqrt();

        if distance < ARRIVAL_DISTANCE {
            let mut rng = rand::thread_rng();
            state.target_x = rng.gen_range(-ROAM_EXTENT..ROAM_EXTENT);
            state.target_z = rng.gen_range(-ROAM_EXTENT..ROAM_EXTENT);
        } else {
            let step = (self.settings.walk_speed * dt).min(distance);
            state.position.x += dx / distance * step;
            state.position.z += dz / distance * step;
            state.heading_radians = dx.atan2(dz);
        }

        let zone_id = self.settings.zone_ids[state.zone_index];
        Ok(self.snapshot(&state, zone_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationSettings;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            player_name: "Warrior".to_string(),
            zone_ids: vec![100, 105],
            zone_dwell_secs: 3600,
            load_screen_ms: 500,
            walk_speed: 6.0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_walker_moves_within_a_zone() {
        let provider = SimulatedProvider::new(settings());

        let first = provider.local_actor().await.expect("snapshot");
        assert_eq!(first.name, "Warrior");
        assert_eq!(first.zone_id, 100);

        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = provider.local_actor().await.expect("snapshot");
        tokio::time::sleep(Duration::from_secs(1)).await;
        let third = provider.local_actor().await.expect("snapshot");

        assert_eq!(second.zone_id, 100);
        // The walker covered ground between reads.
        assert_ne!(first.position, third.position);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zone_rotation_passes_through_a_load_screen() {
        let mut cfg = settings();
        cfg.zone_dwell_secs = 2;
        let provider = SimulatedProvider::new(cfg);

        assert_eq!(provider.local_actor().await.expect("snapshot").zone_id, 100);

        // Dwell expires: the next read lands on the load screen.
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(provider.local_actor().await.expect("snapshot").zone_id, 0);

        // Load screen is still up shortly after.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(provider.local_actor().await.expect("snapshot").zone_id, 0);

        // And the next zone appears once it clears.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(provider.local_actor().await.expect("snapshot").zone_id, 105);
    }
}
