//! Recently-announced suppression with per-key expiry

use std::collections::HashMap;
use tokio::time::{Duration, Instant};

/// Tracks which announcement keys were spoken recently.
///
/// Each key expires on its own clock, so a key announced late in a cycle
/// is never released early by an older key timing out.
pub struct CooldownSet {
    entries: HashMap<String, Instant>,
    ttl: Duration,
}

impl CooldownSet {
    /// Create a set whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Mark a key as just announced
    pub fn insert(&mut self, key: String, now: Instant) {
        self.entries.insert(key, now);
    }

    /// Whether a key is still inside its cool-down window
    pub fn suppressed(&self, key: &str, now: Instant) -> bool {
        match self.entries.get(key) {
            Some(announced) => now.duration_since(*announced) < self.ttl,
            None => false,
        }
    }

    /// Drop expired entries
    pub fn sweep(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, announced| now.duration_since(*announced) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all keys immediately
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
