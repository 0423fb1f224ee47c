//! saarthi-core: shared types for the Saarthi perception/narration stack
//!
//! Holds the vocabulary both sides of the system speak (detections,
//! directions, tiers, priorities, capture conditions) plus the workspace
//! error type. No async, no I/O.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    BoundingBox, CaptureConditions, Detection, Direction, LightingQuality, SourceTier,
    SpeechPriority,
};
