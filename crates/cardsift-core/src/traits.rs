use crate::{
    error::SiftError,
    event::{Control, DecisionRecord, ProfileEvent},
};
use async_trait::async_trait;

/// Messaging transport trait: the link to the remote bot.
///
/// A transport delivers decoded profile events and performs the two
/// outbound operations the gateway needs: pressing a control and sending
/// plain text.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Start listening for incoming events.
    /// Returns a receiver that yields decoded profile events.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<ProfileEvent>, SiftError>;

    /// Press `control` on the message behind `event`.
    async fn activate(&self, event: &ProfileEvent, control: &Control) -> Result<(), SiftError>;

    /// Send a plain text message to `target` (a chat id or username).
    async fn send_text(&self, target: &str, text: &str) -> Result<(), SiftError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), SiftError>;
}

/// Sink for classified profiles.
#[async_trait]
pub trait DecisionRecorder: Send + Sync {
    async fn record(&self, record: &DecisionRecord) -> Result<(), SiftError>;
}
