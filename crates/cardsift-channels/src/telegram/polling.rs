//! Long-polling update loop and Transport trait implementation.

use super::markup::to_event;
use super::types::{TgResponse, TgUpdate};
use super::TelegramTransport;
use async_trait::async_trait;
use cardsift_core::{
    error::SiftError,
    event::{Control, ControlKind, ProfileEvent},
    traits::Transport,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const ALLOWED_UPDATES: &str = r#"["message","edited_message"]"#;

#[async_trait]
impl Transport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<ProfileEvent>, SiftError> {
        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram transport starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut query = vec![
                    ("timeout", "30".to_string()),
                    ("allowed_updates", ALLOWED_UPDATES.to_string()),
                ];
                if let Some(off) = offset {
                    query.push(("offset", off.to_string()));
                }

                let resp = match client
                    .get(format!("{base_url}/getUpdates"))
                    .query(&query)
                    .timeout(std::time::Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let (msg, is_edit) = match (update.message, update.edited_message) {
                        (Some(m), _) => (m, false),
                        (None, Some(m)) => (m, true),
                        (None, None) => continue,
                    };

                    if !matches!(msg.chat.chat_type.as_str(), "private" | "") {
                        debug!("telegram: ignoring non-private chat {}", msg.chat.id);
                        continue;
                    }

                    if tx.send(to_event(msg, is_edit)).await.is_err() {
                        info!("telegram transport receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn activate(&self, event: &ProfileEvent, control: &Control) -> Result<(), SiftError> {
        match control.kind {
            ControlKind::Persistent => self.send_text(&event.chat, &control.label).await,
            ControlKind::Inline => {
                let data = control.data.as_deref().ok_or_else(|| {
                    SiftError::Channel(format!("inline button '{}' has no callback data", control.label))
                })?;
                self.press_callback(&event.chat, event.message_id, data).await
            }
        }
    }

    async fn send_text(&self, target: &str, text: &str) -> Result<(), SiftError> {
        self.send_message(target, text).await
    }

    async fn stop(&self) -> Result<(), SiftError> {
        info!("Telegram transport stopped");
        Ok(())
    }
}
