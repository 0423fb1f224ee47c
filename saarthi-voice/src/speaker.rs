//! Speech output contract and reference implementations

use crate::error::NarrationError;
use async_trait::async_trait;
use parking_lot::Mutex;
use saarthi_core::types::SpeechPriority;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Trait for speech backends
///
/// `Critical` utterances must interrupt whatever is currently playing;
/// lower priorities queue behind it.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak one utterance
    async fn speak(&self, text: &str, priority: SpeechPriority) -> Result<(), NarrationError>;

    /// Whether an utterance is currently playing
    fn is_speaking(&self) -> bool;

    /// Update the speech rate in words per minute
    fn set_rate(&self, _rate: u32) {}
}

/// Speaker that logs utterances instead of synthesizing audio.
pub struct TracingSpeaker;

impl TracingSpeaker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Speaker for TracingSpeaker {
    async fn speak(&self, text: &str, priority: SpeechPriority) -> Result<(), NarrationError> {
        info!("[{:?}] {}", priority, text);
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

/// Speaker that records utterances for assertions in tests and examples.
#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<(String, SpeechPriority)>>,
    speaking: AtomicBool,
    rate: Mutex<Option<u32>>,
}

impl RecordingSpeaker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything spoken so far, in order
    pub fn spoken(&self) -> Vec<(String, SpeechPriority)> {
        self.spoken.lock().clone()
    }

    /// Just the texts, in order
    pub fn texts(&self) -> Vec<String> {
        self.spoken.lock().iter().map(|(t, _)| t.clone()).collect()
    }

    /// Simulate the synthesizer being mid-utterance
    pub fn set_speaking(&self, speaking: bool) {
        self.speaking.store(speaking, Ordering::SeqCst);
    }

    /// Rate last passed through set_rate
    pub fn rate(&self) -> Option<u32> {
        *self.rate.lock()
    }

    pub fn clear(&self) {
        self.spoken.lock().clear();
    }
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    async fn speak(&self, text: &str, priority: SpeechPriority) -> Result<(), NarrationError> {
        self.spoken.lock().push((text.to_string(), priority));
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    fn set_rate(&self, rate: u32) {
        *self.rate.lock() = Some(rate);
    }
}
