//! Basic example of driving the perception pipeline with scripted detectors

use saarthi_core::types::BoundingBox;
use saarthi_eye::detectors::scripted::StaticDetector;
use saarthi_eye::detectors::{DetectorRegistry, RawObservation};
use saarthi_eye::{Frame, IngestOutcome, PerceptionConfig, PerceptionPipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Scripted detectors stand in for real model backends
    let registry = DetectorRegistry::new()
        .with_object_boxes(Arc::new(StaticDetector::new(
            "boxes",
            vec![
                RawObservation::with_bbox("chair", 0.72, BoundingBox::new(0.05, 0.3, 0.2, 0.5)),
                RawObservation::with_bbox("table", 0.61, BoundingBox::new(0.4, 0.35, 0.3, 0.4)),
            ],
        )))
        .with_object_classifier(Arc::new(StaticDetector::new(
            "classifier",
            vec![RawObservation::new("desk lamp", 0.48)],
        )))
        .with_scene(Arc::new(StaticDetector::new(
            "scene",
            vec![RawObservation::new("office", 0.83)],
        )));

    let mut config = PerceptionConfig::default();
    config.frame_stride = 10;

    let pipeline = PerceptionPipeline::new(registry, config)?;

    // Simulate a camera delivering a steady stream of frames
    let frame = Frame::solid(640, 480, [160, 160, 160])?;
    for _ in 0..40 {
        if pipeline.ingest_frame(&frame).await == IngestOutcome::Processed {
            if let Some(snapshot) = pipeline.snapshot() {
                println!(
                    "frame {}: scene={:?}, {} detections ({} stable)",
                    snapshot.frame_index,
                    snapshot.scene,
                    snapshot.detections.len(),
                    pipeline.stable_detections().len()
                );
                for detection in &snapshot.detections {
                    println!(
                        "  {} ({:.0}%) {:?} distance={:?}",
                        detection.label,
                        detection.confidence * 100.0,
                        detection.direction,
                        detection.distance
                    );
                }
            }
        }
    }

    Ok(())
}
