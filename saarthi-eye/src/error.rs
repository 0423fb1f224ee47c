//! Error types for saarthi-eye

use saarthi_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerceptionError {
    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl From<PerceptionError> for CoreError {
    fn from(err: PerceptionError) -> Self {
        CoreError::Perception(err.to_string())
    }
}
