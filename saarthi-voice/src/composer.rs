//! Turns fused detections into prioritized utterances

use crate::config::NarrationConfig;
use crate::cooldown::CooldownSet;
use crate::grammar::{article_for, capitalize_first, clean_label, pluralize};
use saarthi_core::types::{Detection, Direction, LightingQuality, SourceTier, SpeechPriority};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Instant;

/// One scheduled piece of speech.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub priority: SpeechPriority,
}

/// Composes spoken descriptions from a fused detection list.
///
/// Hazards are exclusive: when any survive the cool-down filter, the cycle
/// speaks warnings only. Otherwise personal items come first, then everyday
/// objects grouped by direction, then a scene fallback, then lighting hints.
pub struct Composer {
    config: Arc<NarrationConfig>,
}

impl Composer {
    /// Create a composer
    pub fn new(config: Arc<NarrationConfig>) -> Self {
        Self { config }
    }

    /// Compose one cycle's utterances.
    ///
    /// Every label+direction key spoken here enters the cool-down set, and
    /// keys already cooling down are skipped entirely.
    pub fn compose(
        &self,
        detections: &[Detection],
        scene: Option<&str>,
        lighting: LightingQuality,
        cooldown: &mut CooldownSet,
        now: Instant,
    ) -> Vec<Utterance> {
        let mut seen_labels: HashSet<&str> = HashSet::new();
        let mut hazards: Vec<&Detection> = Vec::new();
        let mut personal: Vec<&Detection> = Vec::new();
        let mut everyday: Vec<&Detection> = Vec::new();

        for det in detections {
            if cooldown.suppressed(&det.cooldown_key(), now) {
                continue;
            }
            if !seen_labels.insert(det.label.as_str()) {
                continue;
            }
            match det.tier {
                SourceTier::Hazard => hazards.push(det),
                SourceTier::Personal => personal.push(det),
                SourceTier::Obstacle | SourceTier::General => everyday.push(det),
            }
        }

        let mut utterances: Vec<Utterance> = Vec::new();

        if !hazards.is_empty() {
            for det in hazards.iter().take(self.config.max_hazards) {
                let label = clean_label(&det.label);
                let mut text = format!(
                    "Warning! Be careful of {} {} {}",
                    article_for(&label),
                    label,
                    det.direction.phrase()
                );
                if let Some(suffix) = self.distance_phrase(det) {
                    text.push_str(&suffix);
                }
                utterances.push(Utterance {
                    text,
                    priority: SpeechPriority::Critical,
                });
                cooldown.insert(det.cooldown_key(), now);
            }
            // Warnings are never diluted with lower categories
            return self.merge(utterances);
        }

        for det in personal.iter().take(self.config.max_personal) {
            let label = clean_label(&det.label);
            let mut text = format!("{}, {}", capitalize_first(&label), det.direction.phrase());
            if let Some(suffix) = self.distance_phrase(det) {
                text.push_str(&suffix);
            }
            utterances.push(Utterance {
                text,
                priority: SpeechPriority::Normal,
            });
            cooldown.insert(det.cooldown_key(), now);
        }

        let mut groups: Vec<(Direction, Vec<&Detection>)> = Vec::new();
        for det in &everyday {
            match groups.iter_mut().find(|(dir, _)| *dir == det.direction) {
                Some((_, items)) => items.push(det),
                None => groups.push((det.direction, vec![det])),
            }
        }

        let mut spoke_objects = false;
        for (direction, items) in groups.iter().take(self.config.max_direction_groups) {
            utterances.push(Utterance {
                text: self.object_group_text(*direction, items),
                priority: SpeechPriority::Normal,
            });
            for det in items.iter().take(self.config.max_objects_per_direction) {
                cooldown.insert(det.cooldown_key(), now);
            }
            spoke_objects = true;
        }

        if !spoke_objects {
            if let Some(scene) = scene {
                let scene = scene.trim().to_lowercase();
                if !scene.is_empty() {
                    utterances.push(Utterance {
                        text: format!("You are in {} {}", article_for(&scene), scene),
                        priority: SpeechPriority::Normal,
                    });
                }
            }
        }

        if lighting == LightingQuality::Dim {
            utterances.push(Utterance {
                text: "Lighting is dim".to_string(),
                priority: SpeechPriority::Low,
            });
        }

        self.merge(utterances)
    }

    fn object_group_text(&self, direction: Direction, items: &[&Detection]) -> String {
        match items.len() {
            1 => {
                let label = clean_label(&items[0].label);
                format!(
                    "There is {} {} {}",
                    article_for(&label),
                    label,
                    direction.phrase()
                )
            }
            2 => {
                let first = clean_label(&items[0].label);
                let second = clean_label(&items[1].label);
                format!(
                    "{} and {} {}",
                    capitalize_first(&first),
                    second,
                    direction.phrase()
                )
            }
            _ => {
                let mut names: Vec<String> = items
                    .iter()
                    .take(self.config.max_objects_per_direction)
                    .map(|det| clean_label(&det.label))
                    .collect();
                names[0] = capitalize_first(&names[0]);
                let overflow = items.len() - names.len();

                let body = if overflow == 0 {
                    match names.pop() {
                        Some(last) => format!("{}, and {}", names.join(", "), last),
                        None => String::new(),
                    }
                } else {
                    format!(
                        "{}, and {} more {}",
                        names.join(", "),
                        overflow,
                        pluralize("object", overflow)
                    )
                };
                format!("{} {}", body, direction.phrase())
            }
        }
    }

    fn distance_phrase(&self, det: &Detection) -> Option<String> {
        if !self.config.announce_distance {
            return None;
        }
        let distance = det.distance?;
        if distance < 1.0 {
            Some(", very close".to_string())
        } else {
            let meters = distance.round() as usize;
            Some(format!(
                ", about {} {} away",
                meters,
                pluralize("meter", meters)
            ))
        }
    }

    /// Merge adjacent same-priority utterances into compound sentences,
    /// staying under the configured character cap.
    fn merge(&self, utterances: Vec<Utterance>) -> Vec<Utterance> {
        let mut merged: Vec<Utterance> = Vec::new();
        for utt in utterances {
            match merged.last_mut() {
                Some(last)
                    if last.priority == utt.priority
                        && last.text.len() + 2 + utt.text.len()
                            <= self.config.merge_char_limit =>
                {
                    last.text.push_str(". ");
                    last.text.push_str(&utt.text);
                }
                _ => merged.push(utt),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saarthi_core::types::BoundingBox;
    use tokio::time::Duration;

    fn composer() -> Composer {
        Composer::new(Arc::new(NarrationConfig::default()))
    }

    /// Composer whose merge step is effectively disabled, so tests can
    /// count utterances one-to-one.
    fn unmerged_composer() -> Composer {
        let mut config = NarrationConfig::default();
        config.merge_char_limit = 20;
        Composer::new(Arc::new(config))
    }

    fn cooldown() -> CooldownSet {
        CooldownSet::new(Duration::from_secs(10))
    }

    fn detection(label: &str, tier: SourceTier) -> Detection {
        Detection::new(label, 0.8, None, tier)
    }

    fn detection_at(label: &str, tier: SourceTier, center_x: f32) -> Detection {
        let bbox = BoundingBox::new(center_x - 0.05, 0.4, 0.1, 0.2);
        Detection::new(label, 0.8, Some(bbox), tier)
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_composes_nothing() {
        let mut cd = cooldown();
        let result = composer().compose(&[], None, LightingQuality::Good, &mut cd, Instant::now());
        assert!(result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hazard_exclusivity() {
        let detections = vec![
            detection_at("knife", SourceTier::Hazard, 0.2),
            detection_at("cup", SourceTier::General, 0.8),
            detection("my_wallet", SourceTier::Personal),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            Some("kitchen"),
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].priority, SpeechPriority::Critical);
        assert!(result[0].text.contains("Warning! Be careful of a knife on your left"));
        assert!(!result[0].text.contains("cup"));
        assert!(!result[0].text.contains("wallet"));
        assert!(!result[0].text.contains("kitchen"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hazard_cap_of_two() {
        let detections = vec![
            detection("stairs", SourceTier::Hazard),
            detection("broken glass", SourceTier::Hazard),
            detection("stove", SourceTier::Hazard),
        ];
        let mut cd = cooldown();
        let result = unmerged_composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 2);
        assert!(result[0].text.contains("stairs"));
        assert!(result[1].text.contains("broken glass"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_dim_warning_on_hazard_cycle() {
        let detections = vec![detection("stairs", SourceTier::Hazard)];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Dim,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert!(!result[0].text.contains("Lighting"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_personal_item_phrasing() {
        let detections = vec![detection_at("my_wallet", SourceTier::Personal, 0.9)];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert!(result[0].text.starts_with("Your wallet, on your right"));
        assert_eq!(result[0].priority, SpeechPriority::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_object_phrasing() {
        let detections = vec![detection("chair", SourceTier::General)];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "There is a chair ahead");
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_object_group_phrasing() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.2),
            detection_at("table", SourceTier::General, 0.2),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Chair and table on your left");
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_object_group_phrasing() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.5),
            detection_at("table", SourceTier::General, 0.5),
            detection_at("door", SourceTier::General, 0.5),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Chair, table, and door ahead");
    }

    #[tokio::test(start_paused = true)]
    async fn test_object_group_overflow_phrasing() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.5),
            detection_at("table", SourceTier::General, 0.5),
            detection_at("door", SourceTier::General, 0.5),
            detection_at("shelf", SourceTier::General, 0.5),
            detection_at("plant", SourceTier::General, 0.5),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "Chair, table, door, and 2 more objects ahead");
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_group_cap() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.2),
            detection_at("table", SourceTier::General, 0.5),
            detection_at("door", SourceTier::General, 0.9),
        ];
        let mut cd = cooldown();
        let result = unmerged_composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        // Three direction groups present, only the first two spoken
        assert_eq!(result.len(), 2);
        assert!(result[0].text.contains("chair"));
        assert!(result[1].text.contains("table"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scene_fallback_when_no_objects() {
        let mut cd = cooldown();
        let result = composer().compose(
            &[],
            Some("office"),
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "You are in an office");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scene_suppressed_when_objects_spoken() {
        let detections = vec![detection("chair", SourceTier::General)];
        let mut cd = cooldown();
        let result = unmerged_composer().compose(
            &detections,
            Some("office"),
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert!(!result[0].text.contains("office"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scene_spoken_alongside_personal_items() {
        let detections = vec![detection("my_keys", SourceTier::Personal)];
        let mut cd = cooldown();
        let result = unmerged_composer().compose(
            &detections,
            Some("office"),
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 2);
        assert!(result[0].text.contains("Your keys"));
        assert_eq!(result[1].text, "You are in an office");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dim_lighting_appends_warning() {
        let detections = vec![detection("chair", SourceTier::General)];
        let mut cd = cooldown();
        let result = unmerged_composer().compose(
            &detections,
            None,
            LightingQuality::Dim,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].text, "Lighting is dim");
        assert_eq!(result[1].priority, SpeechPriority::Low);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_suppresses_and_releases() {
        let detections = vec![detection("chair", SourceTier::General)];
        let mut cd = cooldown();
        let c = composer();

        let first = c.compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );
        assert_eq!(first.len(), 1);

        tokio::time::advance(Duration::from_secs(5)).await;
        let suppressed = c.compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );
        assert!(suppressed.is_empty());

        tokio::time::advance(Duration::from_secs(6)).await;
        let released = c.compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );
        assert_eq!(released.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_label_duplicates_skipped_within_pass() {
        let detections = vec![
            detection_at("cup", SourceTier::General, 0.2),
            detection_at("cup", SourceTier::General, 0.8),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "There is a cup on your left");
    }

    #[tokio::test(start_paused = true)]
    async fn test_distance_phrase_on_hazard() {
        let det = Detection::new(
            "stairs",
            0.9,
            Some(BoundingBox::new(0.4, 0.2, 0.2, 0.7)),
            SourceTier::Hazard,
        )
        .with_distance(Some(2.0));
        let mut cd = cooldown();
        let result = composer().compose(
            &[det],
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert!(result[0].text.ends_with(", about 2 meters away"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_distance_phrase_very_close() {
        let det = detection("my_wallet", SourceTier::Personal).with_distance(Some(0.4));
        let mut cd = cooldown();
        let result = composer().compose(
            &[det],
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert!(result[0].text.ends_with(", very close"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_distance_phrase_singular_meter() {
        let det = detection("my_keys", SourceTier::Personal).with_distance(Some(1.2));
        let mut cd = cooldown();
        let result = composer().compose(
            &[det],
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert!(result[0].text.ends_with(", about 1 meter away"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_distance_disabled_by_config() {
        let mut config = NarrationConfig::default();
        config.announce_distance = false;
        let c = Composer::new(Arc::new(config));

        let det = detection("my_wallet", SourceTier::Personal).with_distance(Some(2.0));
        let mut cd = cooldown();
        let result = c.compose(
            &[det],
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert!(!result[0].text.contains("meters"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_adjacent_same_priority_merge() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.2),
            detection_at("table", SourceTier::General, 0.8),
        ];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Good,
            &mut cd,
            Instant::now(),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].text,
            "There is a chair on your left. There is a table on your right"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_merge_respects_priority_boundary() {
        let detections = vec![detection("chair", SourceTier::General)];
        let mut cd = cooldown();
        let result = composer().compose(
            &detections,
            None,
            LightingQuality::Dim,
            &mut cd,
            Instant::now(),
        );

        // Object text is Normal, lighting hint is Low; they never merge
        assert_eq!(result.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deterministic_composition() {
        let detections = vec![
            detection_at("chair", SourceTier::General, 0.2),
            detection("my_wallet", SourceTier::Personal),
        ];

        let mut cd_a = cooldown();
        let mut cd_b = cooldown();
        let now = Instant::now();
        let a = composer().compose(
            &detections,
            Some("office"),
            LightingQuality::Good,
            &mut cd_a,
            now,
        );
        let b = composer().compose(
            &detections,
            Some("office"),
            LightingQuality::Good,
            &mut cd_b,
            now,
        );

        assert_eq!(a, b);
    }
}
