//! Narration events broadcast to platform listeners

use saarthi_core::types::{Direction, SpeechPriority};
use serde::{Deserialize, Serialize};

/// Why an automatic cycle produced no speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The speaker was mid-utterance when the timer fired
    SpeakerBusy,
    /// Composition produced nothing to say
    NothingToSay,
    /// No perception snapshot was available yet
    NoSnapshot,
}

/// Events emitted by the announcement scheduler.
///
/// The platform layer listens for these to drive haptics and UI state;
/// dropping the receiver just loses events, it never blocks narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NarrationEvent {
    /// An utterance was handed to the speaker
    Spoken {
        text: String,
        priority: SpeechPriority,
    },
    /// A hazard warning went out, for haptic feedback
    HazardAlert {
        label: String,
        direction: Direction,
    },
    /// An automatic cycle was skipped
    CycleSkipped { reason: SkipReason },
}
