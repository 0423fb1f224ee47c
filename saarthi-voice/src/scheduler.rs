//! Announcement scheduling over the perception pipeline

use crate::composer::{Composer, Utterance};
use crate::config::NarrationConfig;
use crate::cooldown::CooldownSet;
use crate::error::NarrationError;
use crate::events::{NarrationEvent, SkipReason};
use crate::speaker::Speaker;
use parking_lot::{Mutex, RwLock};
use saarthi_core::types::{CaptureConditions, Direction, LightingQuality, SourceTier};
use saarthi_eye::PerceptionPipeline;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

const EVENT_BUFFER_SIZE: usize = 256;

const PROMPT_HOLD_STILL: &str = "Please hold camera still";
const PROMPT_TOO_DARK: &str = "Too dark to see. Please turn on a light";
const PROMPT_NOTHING_FOUND: &str = "No objects detected. Try moving the camera around";

/// Offsets from cycle start at which each utterance should begin.
pub fn plan_delays(count: usize, gap_secs: f64) -> Vec<Duration> {
    (0..count)
        .map(|index| Duration::from_secs_f64(gap_secs * index as f64))
        .collect()
}

struct SchedulerCore {
    config: Arc<NarrationConfig>,
    pipeline: Arc<PerceptionPipeline>,
    speaker: Arc<dyn Speaker>,
    composer: Composer,
    cooldown: Mutex<CooldownSet>,
    event_sender: broadcast::Sender<NarrationEvent>,
}

impl SchedulerCore {
    fn emit(&self, event: NarrationEvent) {
        let _ = self.event_sender.send(event);
    }

    async fn speak_prompt(&self, text: &str) {
        match self
            .speaker
            .speak(text, saarthi_core::types::SpeechPriority::High)
            .await
        {
            Ok(()) => self.emit(NarrationEvent::Spoken {
                text: text.to_string(),
                priority: saarthi_core::types::SpeechPriority::High,
            }),
            Err(e) => warn!("Speaker failed on prompt: {}", e),
        }
    }

    /// Speak a corrective prompt when capture conditions block narration.
    /// Returns true when narration is blocked this cycle.
    async fn gate_on_conditions(&self, conditions: &CaptureConditions) -> bool {
        if !conditions.camera_stable {
            self.speak_prompt(PROMPT_HOLD_STILL).await;
            return true;
        }
        if conditions.lighting == LightingQuality::TooDark {
            self.speak_prompt(PROMPT_TOO_DARK).await;
            return true;
        }
        false
    }

    /// One timer-driven announcement cycle.
    async fn automatic_cycle(&self) {
        if self.speaker.is_speaking() {
            debug!("Speaker busy, skipping automatic cycle");
            self.emit(NarrationEvent::CycleSkipped {
                reason: SkipReason::SpeakerBusy,
            });
            return;
        }

        let Some(snapshot) = self.pipeline.snapshot() else {
            self.emit(NarrationEvent::CycleSkipped {
                reason: SkipReason::NoSnapshot,
            });
            return;
        };

        if self.gate_on_conditions(&snapshot.conditions).await {
            return;
        }

        let detections = self.pipeline.stable_detections();
        let utterances = self.compose_cycle(
            &detections,
            snapshot.scene.as_deref(),
            snapshot.conditions.lighting,
        );

        if utterances.is_empty() {
            self.emit(NarrationEvent::CycleSkipped {
                reason: SkipReason::NothingToSay,
            });
            return;
        }

        self.dispatch(utterances).await;
    }

    /// Explicit user-triggered announcement, independent of the timer and
    /// of any utterance currently playing. Uses the raw detection set.
    async fn announce_now(&self) -> Result<(), NarrationError> {
        let snapshot = self.pipeline.snapshot();
        let conditions = snapshot
            .as_ref()
            .map(|snap| snap.conditions)
            .unwrap_or_default();

        if self.gate_on_conditions(&conditions).await {
            return Ok(());
        }

        let (detections, scene) = match &snapshot {
            Some(snap) => (snap.detections.clone(), snap.scene.clone()),
            None => (Vec::new(), None),
        };

        let utterances = self.compose_cycle(&detections, scene.as_deref(), conditions.lighting);

        if utterances.is_empty() {
            self.speak_prompt(PROMPT_NOTHING_FOUND).await;
            return Ok(());
        }

        self.dispatch(utterances).await;
        Ok(())
    }

    /// Run the composer against the shared cool-down set and collect
    /// haptic alerts for hazards that will be spoken.
    fn compose_cycle(
        &self,
        detections: &[saarthi_core::types::Detection],
        scene: Option<&str>,
        lighting: LightingQuality,
    ) -> Vec<Utterance> {
        let now = Instant::now();
        let mut cooldown = self.cooldown.lock();
        cooldown.sweep(now);

        let hazard_alerts: Vec<(String, Direction)> = detections
            .iter()
            .filter(|det| det.tier == SourceTier::Hazard)
            .filter(|det| !cooldown.suppressed(&det.cooldown_key(), now))
            .take(self.config.max_hazards)
            .map(|det| (det.label.clone(), det.direction))
            .collect();

        let utterances = self
            .composer
            .compose(detections, scene, lighting, &mut cooldown, now);

        if self.config.haptics_enabled {
            for (label, direction) in hazard_alerts {
                self.emit(NarrationEvent::HazardAlert { label, direction });
            }
        }

        utterances
    }

    /// Speak a cycle's utterances in order, spaced by the configured gap.
    async fn dispatch(&self, utterances: Vec<Utterance>) {
        let delays = plan_delays(utterances.len(), self.config.utterance_gap_secs);
        let mut elapsed = Duration::ZERO;

        for (utterance, delay) in utterances.into_iter().zip(delays) {
            if delay > elapsed {
                tokio::time::sleep(delay - elapsed).await;
                elapsed = delay;
            }

            match self
                .speaker
                .speak(&utterance.text, utterance.priority)
                .await
            {
                Ok(()) => self.emit(NarrationEvent::Spoken {
                    text: utterance.text,
                    priority: utterance.priority,
                }),
                Err(e) => warn!("Speaker failed: {}", e),
            }
        }
    }
}

/// Drives automatic and manual announcements over one speech channel.
pub struct AnnouncementScheduler {
    core: Arc<SchedulerCore>,
    is_running: Arc<RwLock<bool>>,
    timer_handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl AnnouncementScheduler {
    /// Create a scheduler over a perception pipeline and a speaker
    pub fn new(
        pipeline: Arc<PerceptionPipeline>,
        speaker: Arc<dyn Speaker>,
        config: NarrationConfig,
    ) -> Result<Self, NarrationError> {
        config.validate().map_err(NarrationError::Config)?;
        let config = Arc::new(config);
        let (event_sender, _) = broadcast::channel(EVENT_BUFFER_SIZE);

        Ok(Self {
            core: Arc::new(SchedulerCore {
                composer: Composer::new(config.clone()),
                cooldown: Mutex::new(CooldownSet::new(Duration::from_secs_f64(
                    config.cooldown_secs,
                ))),
                pipeline,
                speaker,
                event_sender,
                config,
            }),
            is_running: Arc::new(RwLock::new(false)),
            timer_handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the automatic announcement timer
    pub async fn start(&self) -> Result<(), NarrationError> {
        {
            let mut is_running = self.is_running.write();
            if *is_running {
                return Err(NarrationError::Scheduler(
                    "Announcement scheduler already running".to_string(),
                ));
            }
            *is_running = true;
        }

        self.core.speaker.set_rate(self.core.config.speech_rate);

        let core = self.core.clone();
        let is_running = self.is_running.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs_f64(core.config.interval_secs));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first cycle should
            // land one full interval after start.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !*is_running.read() {
                    break;
                }
                core.automatic_cycle().await;
            }
        });

        *self.timer_handle.write() = Some(handle);
        info!(
            "Announcement scheduler started, interval {}s",
            self.core.config.interval_secs
        );
        Ok(())
    }

    /// Stop the automatic announcement timer
    pub async fn stop(&self) -> Result<(), NarrationError> {
        {
            let mut is_running = self.is_running.write();
            if !*is_running {
                return Ok(());
            }
            *is_running = false;
        }

        let handle_opt = self.timer_handle.write().take();
        if let Some(handle) = handle_opt {
            handle.abort();
            let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
        }

        info!("Announcement scheduler stopped");
        Ok(())
    }

    /// Whether the automatic timer is running
    pub fn is_running(&self) -> bool {
        *self.is_running.read()
    }

    /// Announce the current surroundings immediately
    pub async fn announce_now(&self) -> Result<(), NarrationError> {
        self.core.announce_now().await
    }

    /// Subscribe to narration events
    pub fn subscribe_events(&self) -> broadcast::Receiver<NarrationEvent> {
        self.core.event_sender.subscribe()
    }

    /// Clear announcement suppression and perception state, e.g. when the
    /// user moves to a new room or restarts the camera
    pub fn reset_session(&self) {
        self.core.cooldown.lock().clear();
        self.core.pipeline.reset();
        info!("Narration session reset");
    }
}

impl Drop for AnnouncementScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.timer_handle.write().take() {
            handle.abort();
        }
    }
}
