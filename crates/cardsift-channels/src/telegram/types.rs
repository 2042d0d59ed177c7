//! Telegram Bot API deserialization types.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub parameters: Option<TgResponseParameters>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponseParameters {
    /// Seconds to wait before retrying after a 429.
    pub retry_after: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub edited_message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub chat: TgChat,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub reply_markup: Option<TgReplyMarkup>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    pub username: Option<String>,
}

/// Either an inline keyboard or a standing reply keyboard. Other markup
/// kinds (keyboard removal, force-reply) carry neither field but still
/// count as markup.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TgReplyMarkup {
    pub inline_keyboard: Option<Vec<Vec<TgInlineButton>>>,
    pub keyboard: Option<Vec<Vec<TgKeyboardButton>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgInlineButton {
    #[serde(default)]
    pub text: String,
    /// Absent on url, login, and switch-inline buttons.
    pub callback_data: Option<String>,
}

/// Reply keyboard buttons may be plain strings or objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TgKeyboardButton {
    Plain(String),
    Object {
        #[serde(default)]
        text: String,
    },
}

impl TgKeyboardButton {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Object { text } => text,
        }
    }
}
