//! saarthi-eye: Perception pipeline for saarthi
//!
//! Fuses multiple detector backends (hazard, obstacle, object boxes,
//! whole-frame classifier, personal items, scene) into one prioritized,
//! deduplicated detection list per sampled frame, and tracks per-label
//! stability plus capture conditions across frames.
//!
//! The narration side (saarthi-voice) consumes the snapshots this crate
//! produces.

pub mod conditions;
pub mod config;
pub mod detectors;
pub mod error;
pub mod frame;
pub mod fusion;
pub mod pipeline;
pub mod stability;

pub use config::PerceptionConfig;
pub use error::PerceptionError;
pub use frame::Frame;
pub use fusion::{FusedFrame, FusionEngine};
pub use pipeline::{IngestOutcome, PerceptionPipeline, PerceptionSnapshot};
