use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a selectable control is bound on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Attached to the message that carried it.
    Inline,
    /// A standing keyboard, not tied to any specific message.
    Persistent,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Persistent => "persistent",
        }
    }
}

/// A single button as decoded from the remote markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub kind: ControlKind,
    pub label: String,
    /// Opaque payload an inline button reports back when pressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Control {
    pub fn inline(label: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Inline,
            label: label.into(),
            data: None,
        }
    }

    pub fn persistent(label: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Persistent,
            label: label.into(),
            data: None,
        }
    }

    /// Attach the callback payload.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// An inbound event from the target bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEvent {
    pub id: Uuid,
    /// Username of the chat the event came from, without the leading `@`.
    pub source: String,
    /// Platform-specific chat id used to route replies.
    pub chat: String,
    /// Platform-specific id of the message this event describes.
    pub message_id: i64,
    /// Raw message text (or caption). Empty when the event carries none.
    pub text: String,
    /// Decoded control markup. `None` when the event carried no markup at all.
    pub controls: Option<Vec<Control>>,
    /// Whether this event is an edit of an earlier message.
    #[serde(default)]
    pub is_edit: bool,
    pub timestamp: DateTime<Utc>,
}

impl ProfileEvent {
    /// Whether the event carries non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether the event carried control markup.
    pub fn has_controls(&self) -> bool {
        self.controls.is_some()
    }
}

/// What to do with a profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Like,
    Skip,
    /// Pause the remote feed. Never produced by classification.
    Sleep,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Skip => "skip",
            Self::Sleep => "sleep",
        }
    }

    /// Numeric keystroke some bots expect after a button press.
    pub fn numeric_follow_up(&self) -> Option<&'static str> {
        match self {
            Self::Like => Some("2"),
            Self::Skip => Some("1"),
            Self::Sleep => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified profile, handed to the decision recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub source: String,
    pub text: String,
    pub action: Action,
    pub reason: String,
    pub matched_include: Vec<String>,
    pub matched_exclude: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_kind_names() {
        assert_eq!(Control::inline("❤️").kind.as_str(), "inline");
        assert_eq!(Control::persistent("👎").kind.as_str(), "persistent");
    }

    #[test]
    fn test_control_data_omitted_when_absent() {
        let plain = serde_json::to_value(Control::persistent("1")).unwrap();
        assert_eq!(plain, serde_json::json!({"kind": "persistent", "label": "1"}));

        let pressed = serde_json::to_value(Control::inline("❤️").with_data("like")).unwrap();
        assert_eq!(pressed["data"], "like");
    }
}
