//! Configuration for saarthi-voice

use serde::{Deserialize, Serialize};

/// Narration and scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Seconds between automatic announcement cycles
    pub interval_secs: f64,

    /// Gap between consecutive utterances of one cycle
    pub utterance_gap_secs: f64,

    /// How long an announced label+direction stays suppressed
    pub cooldown_secs: f64,

    /// Hazard warnings spoken per cycle
    pub max_hazards: usize,

    /// Personal items spoken per cycle
    pub max_personal: usize,

    /// Objects listed per direction group
    pub max_objects_per_direction: usize,

    /// Direction groups spoken per cycle
    pub max_direction_groups: usize,

    /// Soft cap when merging adjacent utterances
    pub merge_char_limit: usize,

    /// Speech rate passed to the speaker (words per minute)
    pub speech_rate: u32,

    /// Append rough distance to object phrases
    pub announce_distance: bool,

    /// Emit haptic events alongside hazard warnings
    pub haptics_enabled: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            interval_secs: 4.0,
            utterance_gap_secs: 2.0,
            cooldown_secs: 10.0,
            max_hazards: 2,
            max_personal: 2,
            max_objects_per_direction: 3,
            max_direction_groups: 2,
            merge_char_limit: 100,
            speech_rate: 150,
            announce_distance: true,
            haptics_enabled: true,
        }
    }
}

impl NarrationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs <= 0.0 || self.interval_secs > 60.0 {
            return Err("Announcement interval must be between 0 and 60 seconds".to_string());
        }

        if self.utterance_gap_secs < 0.0 || self.utterance_gap_secs > 30.0 {
            return Err("Utterance gap must be between 0 and 30 seconds".to_string());
        }

        if self.cooldown_secs < 0.0 || self.cooldown_secs > 600.0 {
            return Err("Cool-down must be between 0 and 600 seconds".to_string());
        }

        if self.max_hazards == 0 {
            return Err("Hazard cap must be at least 1".to_string());
        }

        if self.max_objects_per_direction == 0 || self.max_direction_groups == 0 {
            return Err("Direction group caps must be at least 1".to_string());
        }

        if self.merge_char_limit < 20 {
            return Err("Merge character limit must be at least 20".to_string());
        }

        if self.speech_rate == 0 || self.speech_rate > 500 {
            return Err("Speech rate must be between 1 and 500".to_string());
        }

        Ok(())
    }
}
