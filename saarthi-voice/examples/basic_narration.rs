//! Minimal narration demo: scripted detectors feed a perception pipeline
//! while the announcement scheduler speaks through a logging speaker.
//!
//! Run with: cargo run --example basic_narration

use saarthi_core::types::BoundingBox;
use saarthi_eye::detectors::scripted::StaticDetector;
use saarthi_eye::detectors::{DetectorRegistry, RawObservation};
use saarthi_eye::{Frame, PerceptionConfig, PerceptionPipeline};
use saarthi_voice::{AnnouncementScheduler, NarrationConfig, TracingSpeaker};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = DetectorRegistry::new()
        .with_object_boxes(Arc::new(StaticDetector::new(
            "demo-boxes",
            vec![
                RawObservation::with_bbox("chair", 0.82, BoundingBox::new(0.1, 0.4, 0.2, 0.4)),
                RawObservation::with_bbox("table", 0.74, BoundingBox::new(0.6, 0.5, 0.3, 0.3)),
            ],
        )))
        .with_personal_items(Arc::new(StaticDetector::new(
            "demo-personal",
            vec![RawObservation::with_bbox(
                "my_wallet",
                0.68,
                BoundingBox::new(0.45, 0.6, 0.1, 0.15),
            )],
        )))
        .with_scene(Arc::new(StaticDetector::new(
            "demo-scene",
            vec![RawObservation::new("living room", 0.71)],
        )));

    let mut perception = PerceptionConfig::default();
    perception.frame_stride = 5;
    let pipeline = Arc::new(PerceptionPipeline::new(registry, perception)?);

    let speaker = Arc::new(TracingSpeaker::default());
    let scheduler = AnnouncementScheduler::new(
        pipeline.clone(),
        speaker,
        NarrationConfig::default(),
    )?;

    let mut events = scheduler.subscribe_events();
    let event_printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {:?}", event);
        }
    });

    scheduler.start().await?;

    // Simulate a camera delivering ~10 frames per second
    let frame = Frame::solid(64, 64, [150, 150, 150])?;
    for _ in 0..30 {
        pipeline.ingest_frame(&frame).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    println!("--- user taps the announce button ---");
    scheduler.announce_now().await?;

    // Leave the timer running long enough for one automatic cycle
    tokio::time::sleep(Duration::from_secs_f64(4.5)).await;

    scheduler.stop().await?;
    event_printer.abort();

    if let Some(snapshot) = pipeline.snapshot() {
        println!(
            "processed {} frames, last snapshot held {} detections",
            pipeline.frames_seen(),
            snapshot.detections.len()
        );
    }

    Ok(())
}
