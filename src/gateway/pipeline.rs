//! Event processing pipeline: the main handle_event flow.

use super::Gateway;
use cardsift_core::event::{Control, DecisionRecord, ProfileEvent};
use cardsift_engine::{ControlSource, Step};
use tracing::{debug, info, warn};

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 60 {
        let truncated: String = flat.chars().take(60).collect();
        format!("{truncated}...")
    } else {
        flat
    }
}

impl Gateway {
    /// Whether the event comes from the configured target bot.
    pub(super) fn is_target(&self, event: &ProfileEvent) -> bool {
        event
            .source
            .trim_start_matches('@')
            .eq_ignore_ascii_case(&self.target)
    }

    /// Process a single event. Returns `false` if it was not from the target.
    pub(super) async fn handle_event(&self, event: ProfileEvent) -> bool {
        // --- 1. SOURCE FILTER ---
        if !self.is_target(&event) {
            debug!("ignoring event from @{}", event.source);
            return false;
        }

        debug!(
            "target event: text={} markup={} edit={} msg_id={}",
            event.has_text(),
            event.has_controls(),
            event.is_edit,
            event.message_id
        );
        if let Some(controls) = &event.controls {
            let labels: Vec<&str> = controls.iter().map(|c| c.label.as_str()).collect();
            debug!("buttons={labels:?}");
        }

        // --- 2. CORRELATE ---
        match self
            .correlator
            .observe(&event.text, event.controls.as_deref())
        {
            Step::Resume(control) => {
                info!("pressing resume control: {}", control.label);
                self.press(&event, &control).await;
            }
            Step::Buffered => {
                debug!("profile text buffered until its buttons arrive");
            }
            Step::Idle => {
                debug!("nothing to classify");
            }
            Step::Classify {
                text,
                controls,
                source,
            } => {
                self.classify_and_press(&event, &text, &controls, source)
                    .await;
            }
        }
        true
    }

    /// Classify, record, wait, and press.
    async fn classify_and_press(
        &self,
        event: &ProfileEvent,
        text: &str,
        controls: &[Control],
        source: ControlSource,
    ) {
        // --- 3. CLASSIFY ---
        let decision = self.engine.decide(text);
        info!(
            "decision: {} [{}] ({:?} buttons) {}",
            decision.action,
            decision.reason,
            source,
            preview(text)
        );

        // --- 4. RECORD ---
        let record = DecisionRecord {
            source: self.target.clone(),
            text: text.to_string(),
            action: decision.action,
            reason: decision.reason.to_string(),
            matched_include: decision.matched_include.clone(),
            matched_exclude: decision.matched_exclude.clone(),
            timestamp: chrono::Utc::now(),
        };
        if let Err(e) = self.recorder.record(&record).await {
            warn!("failed to record decision: {e}");
        }

        // --- 5. PRESS ---
        tokio::time::sleep(self.buttons.press_delay()).await;
        self.press_choice(event, decision.action, controls).await;
    }
}
