//! Game settings and preferences
//!
//! Persisted as JSON in the key-value store, separately from the best time.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::racing::CarModel;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles per game for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Racer options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSettings {
    /// Laps needed to finish
    pub total_laps: u32,
    /// Player car model
    pub car_model: CarModel,
    /// Player car color (CSS hex)
    pub car_color: String,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            total_laps: 3,
            car_model: CarModel::Speedster,
            car_color: "#3498db".to_string(),
        }
    }
}

/// Soccer options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoccerSettings {
    /// Match length in seconds
    pub match_seconds: f32,
}

impl Default for SoccerSettings {
    fn default() -> Self {
        Self {
            match_seconds: 120.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (smoke, sparks, hit bursts)
    pub particles: bool,
    /// Screen shake on wall hits and laps
    pub screen_shake: bool,
    /// Fixed RNG seed; `None` picks a fresh seed per session
    pub seed: Option<u64>,
    pub racing: RaceSettings,
    pub soccer: SoccerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            seed: None,
            racing: RaceSettings::default(),
            soccer: SoccerSettings::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arcade_settings";

    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the shake for slower machines
        if preset == QualityPreset::Low {
            self.screen_shake = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings, falling back to defaults on a missing or bad blob
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    settings
                }
                Err(err) => {
                    log::warn!("Discarding unreadable settings: {}", err);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(err) => log::warn!("Failed to serialize settings: {}", err),
        }
    }
}
