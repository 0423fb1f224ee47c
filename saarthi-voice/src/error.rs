//! Error types for saarthi-voice

use saarthi_core::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("Speaker error: {0}")]
    Speaker(String),

    #[error("Composer error: {0}")]
    Composer(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl From<NarrationError> for CoreError {
    fn from(err: NarrationError) -> Self {
        CoreError::Narration(err.to_string())
    }
}
