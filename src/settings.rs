//! Engine settings
//!
//! Timing, rewards and ring layouts. Loaded from JSON, falling back to
//! defaults that reproduce the classic three-ring cauldron.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::layout::RingLayout;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Timing preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimingPreset {
    Relaxed,
    #[default]
    Normal,
    Turbo,
}

impl TimingPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingPreset::Relaxed => "Relaxed",
            TimingPreset::Normal => "Normal",
            TimingPreset::Turbo => "Turbo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "slow" => Some(TimingPreset::Relaxed),
            "normal" => Some(TimingPreset::Normal),
            "turbo" | "fast" => Some(TimingPreset::Turbo),
            _ => None,
        }
    }

    /// Seconds a controlled stop takes to land
    pub fn deceleration_time(&self) -> f32 {
        match self {
            TimingPreset::Relaxed => 3.0,
            TimingPreset::Normal => 2.0,
            TimingPreset::Turbo => 1.0,
        }
    }

    /// Seconds between the last ring landing and resolution
    pub fn settle_delay(&self) -> f32 {
        match self {
            TimingPreset::Relaxed => 0.25,
            TimingPreset::Normal => 0.1,
            TimingPreset::Turbo => 0.0,
        }
    }

    /// Seconds between payout and the session becoming startable again
    pub fn cooldown_delay(&self) -> f32 {
        match self {
            TimingPreset::Relaxed => 1.0,
            TimingPreset::Normal => 0.5,
            TimingPreset::Turbo => 0.2,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Timing preset the timing fields were derived from
    pub timing: TimingPreset,

    // === Kinematics ===
    /// Free spin speed (degrees/sec)
    pub initial_spin_speed: f32,
    /// Exponential decay rate of a free stop (1/sec)
    pub free_stop_rate: f32,
    /// Speed (degrees/sec) at which a free stop settles
    pub free_stop_threshold: f32,

    // === Controlled stop ===
    /// Seconds from click to landing
    pub deceleration_time: f32,
    /// Extra rotation (degrees) added to each controlled stop
    pub extra_rotations: f32,
    /// Extra wait after the last landing before resolving
    pub settle_delay: f32,
    /// Wait after payout before returning to idle
    pub cooldown_delay: f32,

    // === Economy ===
    /// Resource units debited per session
    pub spin_cost: u32,
    pub three_match_reward: u32,
    pub two_match_reward: u32,

    /// RNG seed for outcome selection
    pub seed: u64,

    /// One layout per ring, in stop order
    pub rings: Vec<RingLayout>,
}

impl Default for Settings {
    fn default() -> Self {
        let preset = TimingPreset::Normal;
        Self {
            timing: preset,

            initial_spin_speed: INITIAL_SPIN_SPEED,
            free_stop_rate: FREE_STOP_RATE,
            free_stop_threshold: FREE_STOP_THRESHOLD,

            deceleration_time: preset.deceleration_time(),
            extra_rotations: EXTRA_ROTATIONS,
            settle_delay: preset.settle_delay(),
            cooldown_delay: preset.cooldown_delay(),

            spin_cost: 1,
            three_match_reward: 15,
            two_match_reward: 5,

            seed: 0x5eed_ca1d_0000_0001,

            rings: (1..=RING_COUNT as u8).map(RingLayout::cauldron).collect(),
        }
    }
}

impl Settings {
    /// Create settings from a timing preset (applies preset defaults)
    pub fn from_preset(preset: TimingPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a timing preset (overwrites the timing fields)
    pub fn apply_preset(&mut self, preset: TimingPreset) {
        self.timing = preset;
        self.deceleration_time = preset.deceleration_time();
        self.settle_delay = preset.settle_delay();
        self.cooldown_delay = preset.cooldown_delay();
    }

    /// Total wait from the third click until resolution
    pub fn resolve_delay(&self) -> f32 {
        self.deceleration_time + self.settle_delay
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with.
    ///
    /// Ring layouts are not checked here: a broken layout degrades to an
    /// empty ring that the session skips.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rings.len() != RING_COUNT {
            return Err(ConfigError::Invalid(format!(
                "expected {} ring layouts, got {}",
                RING_COUNT,
                self.rings.len()
            )));
        }
        if !(self.deceleration_time >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "deceleration_time must be >= 0: {}",
                self.deceleration_time
            )));
        }
        if !(self.settle_delay >= 0.0) || !(self.cooldown_delay >= 0.0) {
            return Err(ConfigError::Invalid("delays must be >= 0".to_string()));
        }
        if !(self.extra_rotations >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "extra_rotations must be >= 0: {}",
                self.extra_rotations
            )));
        }
        if !(self.free_stop_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "free_stop_rate must be > 0: {}",
                self.free_stop_rate
            )));
        }
        if !self.initial_spin_speed.is_finite() || !self.free_stop_threshold.is_finite() {
            return Err(ConfigError::Invalid("speeds must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.rings.len(), RING_COUNT);
        assert_eq!(settings.deceleration_time, 2.0);
        assert_eq!(settings.three_match_reward, 15);
        assert_eq!(settings.two_match_reward, 5);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(TimingPreset::from_str("TURBO"), Some(TimingPreset::Turbo));
        assert_eq!(TimingPreset::from_str("slow"), Some(TimingPreset::Relaxed));
        assert_eq!(TimingPreset::from_str("warp"), None);
        assert_eq!(TimingPreset::Normal.as_str(), "Normal");
    }

    #[test]
    fn test_apply_preset() {
        let settings = Settings::from_preset(TimingPreset::Turbo);
        assert_eq!(settings.timing, TimingPreset::Turbo);
        assert_eq!(settings.deceleration_time, 1.0);
        assert_eq!(settings.settle_delay, 0.0);
        assert!((settings.resolve_delay() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "three_match_reward": 50, "seed": 7 }"#).unwrap();
        assert_eq!(settings.three_match_reward, 50);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.two_match_reward, 5);
        assert_eq!(settings.rings.len(), RING_COUNT);
    }

    #[test]
    fn test_json_roundtrip_keeps_layouts() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.rings, settings.rings);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "deceleration_time": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "rings": [] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(Settings::from_json("not json"), Err(ConfigError::Json(_))));
    }
}
