//! Telegram transport over a Bot-API-compatible HTTP endpoint.
//!
//! Uses long polling via `getUpdates` (new and edited messages) and
//! `sendMessage` for outbound text. Point `api_base` at a server that runs
//! the Bot API surface on behalf of a user account to talk to other bots;
//! such a server also answers `callback_method`, which presses inline
//! buttons by their callback data.
//! Docs: <https://core.telegram.org/bots/api>

mod markup;
mod polling;
mod send;
pub(crate) mod types;


use cardsift_core::config::TelegramConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Telegram transport with long polling.
pub struct TelegramTransport {
    client: reqwest::Client,
    base_url: String,
    /// Method that presses an inline button.
    callback_method: String,
    /// Tracks the last update_id to avoid reprocessing.
    last_update_id: Arc<Mutex<Option<i64>>>,
}

impl TelegramTransport {
    /// Create a new Telegram transport from config.
    pub fn new(config: &TelegramConfig) -> Self {
        let base_url = format!(
            "{}/bot{}",
            config.api_base.trim_end_matches('/'),
            config.api_token
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
            callback_method: config.callback_method.trim().to_string(),
            last_update_id: Arc::new(Mutex::new(None)),
        }
    }
}
