//! Shared vocabulary types for the perception and narration crates

use serde::{Deserialize, Serialize};

/// Horizontal region of the camera view a detection falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Center,
    Right,
}

impl Direction {
    /// Classify a normalized horizontal center into a direction.
    ///
    /// `< 0.33` is left, `> 0.67` is right, everything else (including the
    /// boundaries) is center.
    pub fn from_center(center_x: f32) -> Self {
        if center_x < 0.33 {
            Direction::Left
        } else if center_x > 0.67 {
            Direction::Right
        } else {
            Direction::Center
        }
    }

    /// Derive a direction from an optional bounding box.
    ///
    /// Detections without a box default to center.
    pub fn from_bbox(bbox: Option<&BoundingBox>) -> Self {
        match bbox {
            Some(b) => Self::from_center(b.center_x()),
            None => Direction::Center,
        }
    }

    /// Spoken form used in composed utterances
    pub fn phrase(&self) -> &'static str {
        match self {
            Direction::Left => "on your left",
            Direction::Center => "ahead",
            Direction::Right => "on your right",
        }
    }
}

/// Which detector family produced a detection.
///
/// Declaration order is announcement priority: hazards rank above obstacles,
/// obstacles above general objects, general objects above personal items.
/// Scene context ranks below all of these and is carried separately (it is
/// a label, not a detection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceTier {
    Hazard,
    Obstacle,
    General,
    Personal,
}

/// Priority attached to a spoken utterance.
///
/// `Critical` interrupts in-flight speech; everything else queues behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeechPriority {
    Low,
    Normal,
    High,
    Critical,
}

/// Lighting classification derived from average frame luminance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingQuality {
    Good,
    Dim,
    TooDark,
}

impl LightingQuality {
    /// Classify a normalized [0, 1] luminance value.
    ///
    /// Below 0.2 is too dark, 0.2 up to (but not including) 0.4 is dim,
    /// 0.4 and above is good.
    pub fn from_luminance(luminance: f32) -> Self {
        if luminance < 0.2 {
            LightingQuality::TooDark
        } else if luminance < 0.4 {
            LightingQuality::Dim
        } else {
            LightingQuality::Good
        }
    }
}

/// Axis-aligned bounding box, normalized to 0..1 in both dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Horizontal center of the box
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// One fused detection, immutable once produced.
///
/// Labels are normalized to lowercase at creation so that deduplication,
/// stability counting and cool-down keys compare exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub bbox: Option<BoundingBox>,
    pub direction: Direction,
    pub tier: SourceTier,
    /// Rough distance in meters, when estimable from the box
    pub distance: Option<f32>,
}

impl Detection {
    pub fn new(label: &str, confidence: f32, bbox: Option<BoundingBox>, tier: SourceTier) -> Self {
        let direction = Direction::from_bbox(bbox.as_ref());
        Self {
            label: label.trim().to_lowercase(),
            confidence,
            bbox,
            direction,
            tier,
            distance: None,
        }
    }

    pub fn with_distance(mut self, distance: Option<f32>) -> Self {
        self.distance = distance;
        self
    }

    /// Key used for cool-down suppression
    pub fn cooldown_key(&self) -> String {
        format!("{}|{:?}", self.label, self.direction).to_lowercase()
    }
}

/// Capture-condition signals recomputed for every sampled frame.
///
/// Overwritten in place; no history beyond the previous frame's luminance
/// is retained by the monitor that produces this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureConditions {
    /// Average perceptual luminance of the sampled central crop, [0, 1]
    pub luminance: f32,
    /// False when the luminance delta against the previous frame suggests
    /// motion blur or hand shake
    pub camera_stable: bool,
    pub lighting: LightingQuality,
}

impl CaptureConditions {
    /// Conditions under which object narration is allowed at all
    pub fn allows_narration(&self) -> bool {
        self.camera_stable && self.lighting != LightingQuality::TooDark
    }
}

impl Default for CaptureConditions {
    fn default() -> Self {
        Self {
            luminance: 1.0,
            camera_stable: true,
            lighting: LightingQuality::Good,
        }
    }
}
