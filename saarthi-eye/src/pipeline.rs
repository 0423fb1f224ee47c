//! Frame ingestion and perception state

use crate::conditions::ConditionMonitor;
use crate::config::PerceptionConfig;
use crate::detectors::DetectorRegistry;
use crate::error::PerceptionError;
use crate::frame::Frame;
use crate::fusion::FusionEngine;
use crate::stability::StabilityTracker;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use saarthi_core::types::{CaptureConditions, Detection};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// What happened to a frame handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Frame was fused and the snapshot updated
    Processed,
    /// Frame fell between sampling strides
    SkippedStride,
    /// A previous fusion pass was still in flight
    SkippedBusy,
}

/// The most recent fused perception result.
#[derive(Debug, Clone)]
pub struct PerceptionSnapshot {
    pub detections: Vec<Detection>,
    pub scene: Option<String>,
    pub conditions: CaptureConditions,
    pub frame_index: u64,
    pub captured_at: DateTime<Utc>,
}

/// Owns the fusion engine and all per-session perception state.
///
/// Frames stream in continuously; only every Nth is fused, and a busy flag
/// drops sampled frames while a fusion pass is outstanding so the pipeline
/// always works on the freshest frame rather than a backlog.
pub struct PerceptionPipeline {
    config: Arc<PerceptionConfig>,
    fusion: FusionEngine,
    stability: RwLock<StabilityTracker>,
    monitor: RwLock<ConditionMonitor>,
    snapshot: RwLock<Option<PerceptionSnapshot>>,
    frames_seen: AtomicU64,
    busy: AtomicBool,
}

impl PerceptionPipeline {
    /// Create a pipeline over a detector registry
    pub fn new(
        registry: DetectorRegistry,
        config: PerceptionConfig,
    ) -> Result<Self, PerceptionError> {
        config.validate().map_err(PerceptionError::Config)?;
        let config = Arc::new(config);

        info!(
            "Perception pipeline ready: stride {}, stability threshold {}",
            config.frame_stride, config.stability_threshold
        );

        Ok(Self {
            fusion: FusionEngine::new(registry, config.clone()),
            stability: RwLock::new(StabilityTracker::new(config.stability_threshold)),
            monitor: RwLock::new(ConditionMonitor::new(config.shake_delta)),
            snapshot: RwLock::new(None),
            frames_seen: AtomicU64::new(0),
            busy: AtomicBool::new(false),
            config,
        })
    }

    /// Feed one camera frame through the sampling policy.
    ///
    /// Frame indices start at zero, so the very first frame is always
    /// sampled. Returns what happened to the frame.
    pub async fn ingest_frame(&self, frame: &Frame) -> IngestOutcome {
        let index = self.frames_seen.fetch_add(1, Ordering::SeqCst);

        if index % self.config.frame_stride != 0 {
            return IngestOutcome::SkippedStride;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Fusion busy, dropping sampled frame {}", index);
            return IngestOutcome::SkippedBusy;
        }

        let conditions = self.monitor.write().analyze(frame);
        let fused = self.fusion.fuse(frame).await;

        let labels: HashSet<String> = fused
            .detections
            .iter()
            .map(|det| det.label.clone())
            .collect();
        self.stability.write().update(&labels);

        *self.snapshot.write() = Some(PerceptionSnapshot {
            detections: fused.detections,
            scene: fused.scene,
            conditions,
            frame_index: index,
            captured_at: Utc::now(),
        });

        self.busy.store(false, Ordering::SeqCst);
        IngestOutcome::Processed
    }

    /// Latest fused snapshot, if any frame has been processed
    pub fn snapshot(&self) -> Option<PerceptionSnapshot> {
        self.snapshot.read().clone()
    }

    /// Capture conditions from the latest snapshot
    pub fn conditions(&self) -> Option<CaptureConditions> {
        self.snapshot.read().as_ref().map(|snap| snap.conditions)
    }

    /// Detections from the latest snapshot whose labels have persisted
    /// across enough cycles to narrate unprompted
    pub fn stable_detections(&self) -> Vec<Detection> {
        let snapshot = self.snapshot.read();
        let Some(snap) = snapshot.as_ref() else {
            return Vec::new();
        };

        let stability = self.stability.read();
        snap.detections
            .iter()
            .filter(|det| stability.is_stable(&det.label))
            .cloned()
            .collect()
    }

    /// Total frames offered to the pipeline, sampled or not
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen.load(Ordering::SeqCst)
    }

    /// Forget all per-session state: streaks, luminance history, snapshot,
    /// and the frame counter
    pub fn reset(&self) {
        self.stability.write().clear();
        self.monitor.write().reset();
        *self.snapshot.write() = None;
        self.frames_seen.store(0, Ordering::SeqCst);
        info!("Perception pipeline reset");
    }
}
