//! Scripted detector backends for tests, examples, and bring-up
//!
//! These stand in for real model backends when exercising the pipeline
//! without camera hardware or model files.

use super::{Detector, RawObservation};
use crate::error::PerceptionError;
use crate::frame::Frame;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Detector that returns the same observations for every frame.
pub struct StaticDetector {
    name: String,
    observations: Vec<RawObservation>,
    available: bool,
}

impl StaticDetector {
    /// Create a detector that always reports the given observations
    pub fn new(name: impl Into<String>, observations: Vec<RawObservation>) -> Self {
        Self {
            name: name.into(),
            observations,
            available: true,
        }
    }

    /// Create a detector that reports itself as offline
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: Vec::new(),
            available: false,
        }
    }
}

#[async_trait]
impl Detector for StaticDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<RawObservation>, PerceptionError> {
        Ok(self.observations.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Detector that plays back a per-frame script, then reports nothing.
pub struct SequenceDetector {
    name: String,
    script: Mutex<VecDeque<Vec<RawObservation>>>,
}

impl SequenceDetector {
    /// Create a detector returning each entry of `script` once, in order
    pub fn new(name: impl Into<String>, script: Vec<Vec<RawObservation>>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(script.into()),
        }
    }

    /// Frames remaining in the script
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Detector for SequenceDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<RawObservation>, PerceptionError> {
        Ok(self.script.lock().pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Detector that always fails, for exercising error paths.
pub struct FailingDetector {
    name: String,
}

impl FailingDetector {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Detector for FailingDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<RawObservation>, PerceptionError> {
        Err(PerceptionError::Detector(format!(
            "{} backend failure",
            self.name
        )))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_frame() -> Frame {
        Frame::solid(8, 8, [100, 100, 100]).unwrap()
    }

    #[tokio::test]
    async fn test_static_detector_repeats() {
        let detector = StaticDetector::new("s", vec![RawObservation::new("cup", 0.5)]);
        let frame = test_frame();
        for _ in 0..3 {
            let result = detector.detect(&frame).await.unwrap();
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].label, "cup");
        }
    }

    #[tokio::test]
    async fn test_sequence_detector_plays_in_order() {
        let detector = SequenceDetector::new(
            "seq",
            vec![
                vec![RawObservation::new("chair", 0.6)],
                vec![RawObservation::new("table", 0.7)],
            ],
        );
        let frame = test_frame();

        let first = detector.detect(&frame).await.unwrap();
        assert_eq!(first[0].label, "chair");
        let second = detector.detect(&frame).await.unwrap();
        assert_eq!(second[0].label, "table");
    }

    #[tokio::test]
    async fn test_sequence_detector_exhausts_to_empty() {
        let detector = SequenceDetector::new("seq", vec![vec![RawObservation::new("cup", 0.5)]]);
        let frame = test_frame();

        detector.detect(&frame).await.unwrap();
        assert_eq!(detector.remaining(), 0);
        let after = detector.detect(&frame).await.unwrap();
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn test_failing_detector_errors() {
        let detector = FailingDetector::new("broken");
        let result = detector.detect(&test_frame()).await;
        assert!(result.is_err());
    }
}
