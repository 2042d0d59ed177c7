//! Button activation and the numeric follow-up keystroke.

use super::Gateway;
use cardsift_core::event::{Action, Control, ControlKind, ProfileEvent};
use tracing::{debug, warn};

impl Gateway {
    /// Activate one control. Inline controls are pressed on the message when
    /// the transport allows it; otherwise, and for standing keyboards, the
    /// label is sent as plain text.
    pub(super) async fn press(&self, event: &ProfileEvent, control: &Control) -> bool {
        debug!("pressing {} control '{}'", control.kind.as_str(), control.label);
        if control.kind == ControlKind::Inline {
            match self.transport.activate(event, control).await {
                Ok(()) => return true,
                Err(e) => debug!("inline press failed, sending label instead: {e}"),
            }
        }

        match self.transport.send_text(&event.chat, &control.label).await {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to send button label '{}': {e}", control.label);
                false
            }
        }
    }

    /// Resolve `action` against `controls` and press the chosen one.
    /// Returns whether a control was activated.
    pub(super) async fn press_choice(
        &self,
        event: &ProfileEvent,
        action: Action,
        controls: &[Control],
    ) -> bool {
        if controls.is_empty() {
            debug!("no buttons to press for action={action}");
            return false;
        }

        let Some(resolution) = self.resolver.resolve(action, controls) else {
            let labels: Vec<&str> = controls.iter().map(|c| c.label.as_str()).collect();
            warn!("No matching button for action={action}; buttons={labels:?}");
            return false;
        };

        let control = &controls[resolution.index];
        debug!(
            "action={action} -> '{}' via {} tier",
            control.label,
            resolution.tier.as_str()
        );

        if !self.press(event, control).await {
            return false;
        }

        tokio::time::sleep(self.buttons.dup_delay()).await;
        self.send_numeric_follow_up(event, action).await;
        true
    }

    async fn send_numeric_follow_up(&self, event: &ProfileEvent, action: Action) {
        if !self.buttons.dup_numeric {
            return;
        }
        let Some(digit) = action.numeric_follow_up() else {
            return;
        };
        if let Err(e) = self.transport.send_text(&event.chat, digit).await {
            debug!("numeric follow-up failed: {e}");
        }
    }
}
