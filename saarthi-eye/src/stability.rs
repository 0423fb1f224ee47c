//! Per-label stability tracking across fusion cycles

use std::collections::{HashMap, HashSet};

/// Counts how many consecutive cycles each label has been observed.
///
/// A label becomes stable once its streak reaches the configured threshold.
/// Missing a cycle decrements the streak instead of clearing it, so brief
/// detector flicker does not throw away progress.
pub struct StabilityTracker {
    counts: HashMap<String, u32>,
    threshold: u32,
}

impl StabilityTracker {
    /// Create a tracker requiring `threshold` consecutive sightings
    pub fn new(threshold: u32) -> Self {
        Self {
            counts: HashMap::new(),
            threshold,
        }
    }

    /// Record one fusion cycle's label set
    pub fn update(&mut self, labels: &HashSet<String>) {
        self.counts.retain(|label, count| {
            if labels.contains(label) {
                true
            } else {
                *count = count.saturating_sub(1);
                *count > 0
            }
        });
        for label in labels {
            *self.counts.entry(label.clone()).or_insert(0) += 1;
        }
    }

    /// Whether a label has been seen often enough to narrate
    pub fn is_stable(&self, label: &str) -> bool {
        self.counts
            .get(label)
            .map(|count| *count >= self.threshold)
            .unwrap_or(false)
    }

    /// Current streak for a label, zero when untracked
    pub fn count(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// All labels currently at or above the stability threshold
    pub fn stable_labels(&self) -> Vec<String> {
        self.counts
            .iter()
            .filter(|(_, count)| **count >= self.threshold)
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Drop all streaks
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
