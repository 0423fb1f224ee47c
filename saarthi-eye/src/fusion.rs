//! Multi-detector fusion into a single ranked detection list

use crate::config::PerceptionConfig;
use crate::detectors::vocabulary::{canonical_everyday_label, is_excluded};
use crate::detectors::{DetectorRegistry, DetectorSlot, RawObservation};
use crate::frame::Frame;
use saarthi_core::types::{BoundingBox, Detection, SourceTier};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Reference object height in meters divided by focal scale, tuned for a
/// phone camera at arm's length. Distance is a coarse estimate only.
const DISTANCE_SCALE: f32 = 1.4;
const MIN_DISTANCE_M: f32 = 0.3;
const MAX_DISTANCE_M: f32 = 10.0;

/// One fused perception cycle: ranked detections plus the scene label.
#[derive(Debug, Clone, Default)]
pub struct FusedFrame {
    pub detections: Vec<Detection>,
    pub scene: Option<String>,
}

/// Runs every registered detector over a frame and merges their output
/// into one ranked list, applying tier priorities and thresholds.
pub struct FusionEngine {
    registry: DetectorRegistry,
    config: Arc<PerceptionConfig>,
}

impl FusionEngine {
    /// Create a fusion engine over a detector registry
    pub fn new(registry: DetectorRegistry, config: Arc<PerceptionConfig>) -> Self {
        Self { registry, config }
    }

    /// Run one fusion cycle over a frame.
    ///
    /// All detector backends are consulted concurrently. When any hazard
    /// clears its confidence threshold, the hazard list replaces every
    /// lower tier for this cycle; the scene label is still reported.
    pub async fn fuse(&self, frame: &Frame) -> FusedFrame {
        let (hazard_obs, obstacle_obs, box_obs, classifier_obs, personal_obs, scene_obs) = tokio::join!(
            self.registry.observe(DetectorSlot::Hazard, frame),
            self.observe_obstacles(frame),
            self.registry.observe(DetectorSlot::ObjectBoxes, frame),
            self.registry.observe(DetectorSlot::ObjectClassifier, frame),
            self.registry.observe(DetectorSlot::PersonalItems, frame),
            self.registry.observe(DetectorSlot::Scene, frame),
        );

        let scene = scene_obs
            .iter()
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(Ordering::Equal)
            })
            .map(|obs| obs.label.trim().to_lowercase());

        let hazards: Vec<Detection> = hazard_obs
            .into_iter()
            .filter(|obs| obs.confidence >= self.config.hazard_confidence)
            .map(|obs| to_detection(obs, SourceTier::Hazard))
            .collect();

        if !hazards.is_empty() {
            info!("Hazard detected, suppressing lower tiers this cycle");
            return FusedFrame {
                detections: self.finalize(hazards),
                scene,
            };
        }

        let mut candidates: Vec<Detection> = Vec::new();

        candidates.extend(
            obstacle_obs
                .into_iter()
                .filter(|obs| obs.confidence >= self.config.obstacle_confidence)
                .map(|obs| to_detection(obs, SourceTier::Obstacle)),
        );

        candidates.extend(
            box_obs
                .into_iter()
                .filter(|obs| obs.confidence >= self.config.box_confidence)
                .filter(|obs| !is_excluded(&obs.label))
                .map(|obs| to_detection(obs, SourceTier::General)),
        );

        candidates.extend(
            classifier_obs
                .into_iter()
                .filter(|obs| obs.confidence >= self.config.classifier_confidence)
                .filter_map(|obs| {
                    canonical_everyday_label(&obs.label).map(|canonical| RawObservation {
                        label: canonical.to_string(),
                        confidence: obs.confidence,
                        bbox: obs.bbox,
                    })
                })
                .take(self.config.classifier_max_results)
                .map(|obs| to_detection(obs, SourceTier::General)),
        );

        candidates.extend(
            personal_obs
                .into_iter()
                .filter(|obs| obs.confidence >= self.config.personal_confidence)
                .map(|obs| to_detection(obs, SourceTier::Personal)),
        );

        FusedFrame {
            detections: self.finalize(candidates),
            scene,
        }
    }

    async fn observe_obstacles(&self, frame: &Frame) -> Vec<RawObservation> {
        if !self.config.enable_obstacle_detector {
            return Vec::new();
        }
        self.registry.observe(DetectorSlot::Obstacle, frame).await
    }

    /// Deduplicate by label (first occurrence wins, so tier order decides),
    /// sort by descending confidence, and cap the list length.
    fn finalize(&self, candidates: Vec<Detection>) -> Vec<Detection> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut detections: Vec<Detection> = candidates
            .into_iter()
            .filter(|det| seen.insert(det.label.clone()))
            .collect();

        detections.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        if detections.len() > self.config.max_detections {
            debug!(
                "Truncating {} detections to {}",
                detections.len(),
                self.config.max_detections
            );
            detections.truncate(self.config.max_detections);
        }
        detections
    }
}

fn to_detection(obs: RawObservation, tier: SourceTier) -> Detection {
    let distance = obs.bbox.as_ref().and_then(estimate_distance);
    Detection::new(&obs.label, obs.confidence, obs.bbox, tier).with_distance(distance)
}

/// Estimate distance in meters from a normalized bounding box height.
///
/// Taller boxes are closer. Degenerate boxes yield no estimate.
pub fn estimate_distance(bbox: &BoundingBox) -> Option<f32> {
    if bbox.height <= f32::EPSILON {
        return None;
    }
    Some((DISTANCE_SCALE / bbox.height).clamp(MIN_DISTANCE_M, MAX_DISTANCE_M))
}
