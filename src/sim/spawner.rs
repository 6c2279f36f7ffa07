//! Obstacle spawning with a speed-adaptive interval

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::{self, Obstacle};
use super::registry::ObstacleRegistry;
use crate::Playfield;
use crate::tuning::Tuning;

/// Gap until the next spawn for the given speed.
///
/// Shrinks linearly from `base` toward `min` as speed approaches
/// `max_speed`, and always stays inside `[min, base]`.
pub fn next_interval(speed: f32, max_speed: f32, base: f64, min: f64) -> f64 {
    let (lo, hi) = if min <= base { (min, base) } else { (base, min) };
    if max_speed.is_nan() || max_speed <= 0.0 || !speed.is_finite() {
        return hi;
    }
    let factor = (speed / max_speed).clamp(0.0, 1.0) as f64;
    (hi - (hi - lo) * factor).clamp(lo, hi)
}

/// Decides when and where obstacles appear
#[derive(Debug, Clone)]
pub struct Spawner {
    last_spawn_ms: f64,
    next_interval_ms: f64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64, base_interval: f64) -> Self {
        Self {
            last_spawn_ms: 0.0,
            next_interval_ms: base_interval,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restart the spawn clock at `now`
    pub fn stamp(&mut self, now_ms: f64, base_interval: f64) {
        self.last_spawn_ms = now_ms;
        self.next_interval_ms = base_interval;
    }

    pub fn next_interval_ms(&self) -> f64 {
        self.next_interval_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Spawn one obstacle if the interval has elapsed
    pub fn maybe_spawn(
        &mut self,
        now_ms: f64,
        speed: f32,
        registry: &mut ObstacleRegistry,
        field: &Playfield,
        tuning: &Tuning,
    ) -> Option<Obstacle> {
        if now_ms - self.last_spawn_ms <= self.next_interval_ms {
            return None;
        }
        if tuning.archetypes.is_empty() {
            return None;
        }

        let archetype = &tuning.archetypes[self.rng.random_range(0..tuning.archetypes.len())];
        let spawned = obstacle::place(archetype, field, &mut self.rng);
        log::debug!(
            "spawn {} at y={:.0} (next in {:.0} ms)",
            archetype.name,
            spawned.y,
            self.next_interval_ms
        );
        registry.push(spawned);

        self.last_spawn_ms = now_ms;
        self.next_interval_ms = next_interval(
            speed,
            tuning.max_speed,
            tuning.spawn_interval,
            tuning.min_spawn_interval,
        );
        Some(spawned)
    }
}
