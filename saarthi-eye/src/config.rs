//! Configuration for saarthi-eye

use serde::{Deserialize, Serialize};

/// Perception pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Process every Nth camera frame
    pub frame_stride: u64,
    /// Minimum confidence for hazard reports
    pub hazard_confidence: f32,
    /// Minimum confidence for obstacle reports
    pub obstacle_confidence: f32,
    /// Minimum confidence for box detector reports
    pub box_confidence: f32,
    /// Minimum confidence for whole-frame classifier reports
    pub classifier_confidence: f32,
    /// Classifier labels kept per cycle
    pub classifier_max_results: usize,
    /// Minimum confidence for personal item reports
    pub personal_confidence: f32,
    /// Detections kept per fused frame
    pub max_detections: usize,
    /// Consecutive sightings before a label may be narrated
    pub stability_threshold: u32,
    /// Luminance jump treated as camera shake
    pub shake_delta: f32,
    /// Consult the dedicated obstacle detector
    pub enable_obstacle_detector: bool,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            frame_stride: 30,
            hazard_confidence: 0.60,
            obstacle_confidence: 0.50,
            box_confidence: 0.35,
            classifier_confidence: 0.30,
            classifier_max_results: 6,
            personal_confidence: 0.45,
            max_detections: 10,
            stability_threshold: 3,
            shake_delta: 0.15,
            enable_obstacle_detector: false,
        }
    }
}

impl PerceptionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_stride == 0 || self.frame_stride > 300 {
            return Err("Frame stride must be between 1 and 300".to_string());
        }

        let thresholds = [
            ("hazard_confidence", self.hazard_confidence),
            ("obstacle_confidence", self.obstacle_confidence),
            ("box_confidence", self.box_confidence),
            ("classifier_confidence", self.classifier_confidence),
            ("personal_confidence", self.personal_confidence),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
        }

        if self.classifier_max_results == 0 {
            return Err("Classifier result cap must be at least 1".to_string());
        }

        if self.max_detections == 0 {
            return Err("Detection cap must be at least 1".to_string());
        }

        if self.stability_threshold == 0 {
            return Err("Stability threshold must be at least 1".to_string());
        }

        if self.shake_delta <= 0.0 || self.shake_delta > 1.0 {
            return Err("Shake delta must be in (0.0, 1.0]".to_string());
        }

        Ok(())
    }
}
