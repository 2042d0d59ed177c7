//! Outbound text messages and inline button presses.

use super::types::TgResponse;
use super::TelegramTransport;
use cardsift_core::error::SiftError;
use tracing::{debug, warn};

/// Upper bound on a server-requested flood wait before giving up.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// `chat_id` as the Bot API expects it: numeric ids as numbers, anything
/// else as an `@username` string.
pub(crate) fn chat_id_value(target: &str) -> serde_json::Value {
    match target.trim().parse::<i64>() {
        Ok(id) => serde_json::json!(id),
        Err(_) => serde_json::json!(format!("@{}", target.trim().trim_start_matches('@'))),
    }
}

impl TelegramTransport {
    /// Send a plain text message. A 429 is retried once after the
    /// server-provided `retry_after`.
    pub(crate) async fn send_message(&self, target: &str, text: &str) -> Result<(), SiftError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = serde_json::json!({
            "chat_id": chat_id_value(target),
            "text": text,
        });

        let mut retried = false;
        loop {
            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| SiftError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }

            let error_text = resp.text().await.unwrap_or_default();
            if status.as_u16() == 429 && !retried {
                let wait = serde_json::from_str::<TgResponse<serde_json::Value>>(&error_text)
                    .ok()
                    .and_then(|r| r.parameters)
                    .and_then(|p| p.retry_after)
                    .unwrap_or(1)
                    .min(MAX_RETRY_AFTER_SECS);
                warn!("telegram flood wait {wait}s before resending");
                tokio::time::sleep(std::time::Duration::from_secs(wait + 1)).await;
                retried = true;
                continue;
            }

            return Err(SiftError::Channel(format!(
                "telegram send failed ({status}): {error_text}"
            )));
        }
    }
}

/// The target bot did not answer the callback in time. The press itself
/// was delivered.
const CALLBACK_TIMEOUT: &str = "BOT_RESPONSE_TIMEOUT";

/// Whether a failed callback answer still counts as a press.
pub(crate) fn callback_delivered(description: &str) -> bool {
    description.contains(CALLBACK_TIMEOUT)
}

impl TelegramTransport {
    /// Press an inline button by its callback data on message `message_id`.
    pub(crate) async fn press_callback(
        &self,
        chat: &str,
        message_id: i64,
        data: &str,
    ) -> Result<(), SiftError> {
        if self.callback_method.is_empty() {
            return Err(SiftError::Channel(
                "inline press disabled: callback_method is empty".to_string(),
            ));
        }

        let url = format!("{}/{}", self.base_url, self.callback_method);
        let body = serde_json::json!({
            "chat_id": chat_id_value(chat),
            "message_id": message_id,
            "data": data,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SiftError::Channel(format!("telegram callback failed: {e}")))?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<TgResponse<serde_json::Value>>(&text).ok();

        match parsed {
            Some(r) if r.ok => Ok(()),
            Some(r) if callback_delivered(r.description.as_deref().unwrap_or_default()) => {
                debug!("callback on message {message_id} delivered, bot did not answer");
                Ok(())
            }
            _ => Err(SiftError::Channel(format!(
                "telegram callback failed ({status}): {text}"
            ))),
        }
    }
}
