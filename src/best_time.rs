//! Best race time
//!
//! A single scalar persisted under a fixed key. Read once at startup and
//! written whenever the player wins faster than the stored time.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Personal best finish time in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestTime {
    pub seconds: Option<f32>,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestTime";

    pub fn new() -> Self {
        Self { seconds: None }
    }

    /// Whether `seconds` beats the stored time (anything beats no time)
    pub fn qualifies(&self, seconds: f32) -> bool {
        if !seconds.is_finite() || seconds <= 0.0 {
            return false;
        }
        self.seconds.map(|best| seconds < best).unwrap_or(true)
    }

    /// Record a finish time. Returns true on a new personal best.
    pub fn record(&mut self, seconds: f32) -> bool {
        if !self.qualifies(seconds) {
            return false;
        }
        self.seconds = Some(round_centis(seconds));
        true
    }

    /// Load from storage. Missing, "Infinity" or unparsable values mean no best.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No best time stored");
            return Self::new();
        };
        match raw.trim().parse::<f32>() {
            Ok(value) if value.is_finite() && value > 0.0 => {
                log::info!("Loaded best time {:.2}s", value);
                Self {
                    seconds: Some(value),
                }
            }
            _ => {
                if raw.trim() != "Infinity" {
                    log::warn!("Ignoring unparsable best time '{}'", raw);
                }
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Some(seconds) = self.seconds {
            store.set(Self::STORAGE_KEY, &format!("{:.2}", seconds));
            log::info!("Best time saved ({:.2}s)", seconds);
        }
    }

    /// HUD text: two decimals or "-"
    pub fn display(&self) -> String {
        match self.seconds {
            Some(s) => format!("{:.2}", s),
            None => "-".to_string(),
        }
    }
}

/// Times are shown and stored with two decimals
fn round_centis(seconds: f32) -> f32 {
    (seconds * 100.0).round() / 100.0
}
