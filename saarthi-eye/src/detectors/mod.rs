//! Detector backends feeding the fusion engine

pub mod scripted;
pub mod vocabulary;

use crate::error::PerceptionError;
use crate::frame::Frame;
use async_trait::async_trait;
use saarthi_core::types::BoundingBox;
use std::sync::Arc;
use tracing::warn;

/// A single label reported by a detector backend, before fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub label: String,
    pub confidence: f32,
    pub bbox: Option<BoundingBox>,
}

impl RawObservation {
    /// Create an observation without localization
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox: None,
        }
    }

    /// Create an observation with a normalized bounding box
    pub fn with_bbox(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox: Some(bbox),
        }
    }
}

/// Trait for detector backends
#[async_trait]
pub trait Detector: Send + Sync {
    /// Run the detector over a frame
    async fn detect(&self, frame: &Frame) -> Result<Vec<RawObservation>, PerceptionError>;

    /// Get detector name
    fn name(&self) -> &str;

    /// Check if the backend is ready to serve requests
    fn is_available(&self) -> bool {
        true
    }
}

/// The role a detector plays in the fusion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorSlot {
    Hazard,
    Obstacle,
    ObjectBoxes,
    ObjectClassifier,
    PersonalItems,
    Scene,
}

/// Holds the detector wired into each slot. Every slot is optional;
/// an empty slot simply contributes nothing to the cycle.
#[derive(Default, Clone)]
pub struct DetectorRegistry {
    hazard: Option<Arc<dyn Detector>>,
    obstacle: Option<Arc<dyn Detector>>,
    object_boxes: Option<Arc<dyn Detector>>,
    object_classifier: Option<Arc<dyn Detector>>,
    personal_items: Option<Arc<dyn Detector>>,
    scene: Option<Arc<dyn Detector>>,
}

impl DetectorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hazard(mut self, detector: Arc<dyn Detector>) -> Self {
        self.hazard = Some(detector);
        self
    }

    pub fn with_obstacle(mut self, detector: Arc<dyn Detector>) -> Self {
        self.obstacle = Some(detector);
        self
    }

    pub fn with_object_boxes(mut self, detector: Arc<dyn Detector>) -> Self {
        self.object_boxes = Some(detector);
        self
    }

    pub fn with_object_classifier(mut self, detector: Arc<dyn Detector>) -> Self {
        self.object_classifier = Some(detector);
        self
    }

    pub fn with_personal_items(mut self, detector: Arc<dyn Detector>) -> Self {
        self.personal_items = Some(detector);
        self
    }

    pub fn with_scene(mut self, detector: Arc<dyn Detector>) -> Self {
        self.scene = Some(detector);
        self
    }

    /// Get the detector in a slot, if any
    pub fn get(&self, slot: DetectorSlot) -> Option<&Arc<dyn Detector>> {
        match slot {
            DetectorSlot::Hazard => self.hazard.as_ref(),
            DetectorSlot::Obstacle => self.obstacle.as_ref(),
            DetectorSlot::ObjectBoxes => self.object_boxes.as_ref(),
            DetectorSlot::ObjectClassifier => self.object_classifier.as_ref(),
            DetectorSlot::PersonalItems => self.personal_items.as_ref(),
            DetectorSlot::Scene => self.scene.as_ref(),
        }
    }

    /// Run the detector in a slot. Empty or unavailable slots and backend
    /// failures all yield an empty observation list so one bad backend
    /// cannot take down the cycle.
    pub async fn observe(&self, slot: DetectorSlot, frame: &Frame) -> Vec<RawObservation> {
        let Some(detector) = self.get(slot) else {
            return Vec::new();
        };

        if !detector.is_available() {
            return Vec::new();
        }

        match detector.detect(frame).await {
            Ok(observations) => observations,
            Err(e) => {
                warn!("Detector {} failed: {}", detector.name(), e);
                Vec::new()
            }
        }
    }
}
