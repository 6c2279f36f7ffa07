//! Best score persistence
//!
//! A single number stored as plain text under a fixed key.

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighScore {
    pub value: f64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "dinoHighScore";

    /// Read the stored value; missing or unparsable entries count as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let value = store
            .get_item(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);
        log::info!("Loaded high score {:.0}", value);
        Self { value }
    }

    /// Store `score` if it beats the current best. Returns whether it did.
    pub fn record(&mut self, score: f64, store: &mut dyn KeyValueStore) -> bool {
        if score.is_nan() || score <= self.value {
            return false;
        }
        self.value = score;
        if !store.set_item(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("High score {:.0} not persisted", score);
        }
        true
    }

    /// Whole points for display
    pub fn display(&self) -> u64 {
        self.value.floor() as u64
    }
}
