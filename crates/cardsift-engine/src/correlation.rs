//! Pairs profile text with its controls.
//!
//! The remote bot may deliver a card's text and its buttons in separate
//! messages, out of order, or as edits. [`Correlator`] owns the two pieces of
//! state needed to reassemble them: a single pending text slot and the last
//! meaningful control set.

use cardsift_core::event::{Control, ControlKind};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Label fragments (matched case-insensitively) of controls that re-enter
/// the profile feed.
pub const RESUME_HINTS: &[&str] = &["смотреть анкеты", "view profiles", "\u{1f680}"];

/// The first control whose label carries a resume hint.
pub fn find_resume(controls: &[Control]) -> Option<&Control> {
    controls.iter().find(|c| {
        let lowered = c.label.trim().to_lowercase();
        RESUME_HINTS.iter().any(|hint| lowered.contains(hint))
    })
}

/// Single-slot buffer for text whose controls have not arrived yet.
#[derive(Debug)]
pub struct PendingProfile {
    slot: Option<(String, Instant)>,
    ttl: Duration,
}

impl PendingProfile {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    /// Overwrite the slot. Whitespace-only text is ignored.
    pub fn store(&mut self, text: &str, now: Instant) {
        if text.trim().is_empty() {
            return;
        }
        self.slot = Some((text.to_string(), now));
    }

    /// Consume the slot. Returns `None` if empty or older than the TTL;
    /// the slot is cleared either way.
    pub fn take(&mut self, now: Instant) -> Option<String> {
        let (text, stored_at) = self.slot.take()?;
        if now.saturating_duration_since(stored_at) > self.ttl {
            debug!("pending profile expired, dropping");
            return None;
        }
        Some(text)
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// Snapshot of the last control set that was not a resume prompt.
#[derive(Debug, Default)]
pub struct RememberedControls {
    controls: Vec<Control>,
}

impl RememberedControls {
    /// Replace the snapshot with `controls`, unless the set is empty or
    /// contains a resume control. Unlabelled controls are not kept.
    pub fn remember(&mut self, controls: &[Control]) {
        if controls.is_empty() || find_resume(controls).is_some() {
            return;
        }
        self.controls = controls
            .iter()
            .filter(|c| !c.label.is_empty())
            .cloned()
            .collect();
    }

    /// Whether a standing keyboard is active.
    pub fn has_persistent(&self) -> bool {
        self.controls
            .iter()
            .any(|c| c.kind == ControlKind::Persistent)
    }

    pub fn snapshot(&self) -> Vec<Control> {
        self.controls.clone()
    }
}

/// Where the controls for a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    /// The controls carried by the current event.
    Event,
    /// The remembered standing keyboard.
    Remembered,
}

/// What the caller should do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Press this navigation control. Nothing is classified.
    Resume(Control),
    /// Classify `text` and press one of `controls`.
    Classify {
        text: String,
        controls: Vec<Control>,
        source: ControlSource,
    },
    /// Text was buffered until its controls arrive.
    Buffered,
    /// Nothing to do.
    Idle,
}

#[derive(Debug)]
struct CorrelationState {
    pending: PendingProfile,
    remembered: RememberedControls,
}

/// Owner of the correlation state. All access goes through one mutex so
/// each event observes and mutates the state atomically.
#[derive(Debug)]
pub struct Correlator {
    state: Mutex<CorrelationState>,
}

impl Correlator {
    pub fn new(pending_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CorrelationState {
                pending: PendingProfile::new(pending_ttl),
                remembered: RememberedControls::default(),
            }),
        }
    }

    /// Feed one event. `controls` is `None` when the event had no markup.
    pub fn observe(&self, text: &str, controls: Option<&[Control]>) -> Step {
        self.observe_at(text, controls, Instant::now())
    }

    pub fn observe_at(&self, text: &str, controls: Option<&[Control]>, now: Instant) -> Step {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let has_text = !text.trim().is_empty();

        if let Some(controls) = controls {
            if let Some(resume) = find_resume(controls) {
                return Step::Resume(resume.clone());
            }
            state.remembered.remember(controls);
        }

        let Some(controls) = controls else {
            if !has_text {
                return Step::Idle;
            }
            if state.remembered.has_persistent() {
                return Step::Classify {
                    text: text.to_string(),
                    controls: state.remembered.snapshot(),
                    source: ControlSource::Remembered,
                };
            }
            state.pending.store(text, now);
            return Step::Buffered;
        };

        let text = if has_text {
            state.pending.clear();
            text.to_string()
        } else {
            match state.pending.take(now) {
                Some(pending) => pending,
                None => return Step::Idle,
            }
        };

        Step::Classify {
            text,
            controls: controls.to_vec(),
            source: ControlSource::Event,
        }
    }

    /// Current remembered controls.
    pub fn remembered(&self) -> Vec<Control> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remembered
            .snapshot()
    }

    /// Whether a text is buffered.
    pub fn has_pending(&self) -> bool {
        !self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .is_empty()
    }
}
