//! saarthi-voice: Narration engine for saarthi
//!
//! Consumes perception snapshots from saarthi-eye and turns them into
//! prioritized, rate-limited speech: an announcement composer with a
//! per-key cool-down, and a scheduler driving automatic and manual
//! announcement cycles over one serialized speech channel.

pub mod composer;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod events;
pub mod grammar;
pub mod scheduler;
pub mod speaker;

pub use composer::{Composer, Utterance};
pub use config::NarrationConfig;
pub use cooldown::CooldownSet;
pub use error::NarrationError;
pub use events::{NarrationEvent, SkipReason};
pub use scheduler::AnnouncementScheduler;
pub use speaker::{RecordingSpeaker, Speaker, TracingSpeaker};
