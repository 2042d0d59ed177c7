//! Conversion from Bot API messages to profile events.

use super::types::{TgMessage, TgReplyMarkup};
use cardsift_core::event::{Control, ProfileEvent};
use uuid::Uuid;

/// Flatten a reply markup into controls, row by row.
///
/// Markup without a keyboard (keyboard removal, force-reply) yields an
/// empty list, not `None`: the message still carried markup. Buttons with
/// empty labels are dropped.
pub(crate) fn decode_markup(markup: &TgReplyMarkup) -> Vec<Control> {
    if let Some(rows) = &markup.inline_keyboard {
        return rows
            .iter()
            .flatten()
            .filter(|b| !b.text.is_empty())
            .map(|b| {
                let control = Control::inline(b.text.clone());
                match &b.callback_data {
                    Some(data) => control.with_data(data.clone()),
                    None => control,
                }
            })
            .collect();
    }
    if let Some(rows) = &markup.keyboard {
        return rows
            .iter()
            .flatten()
            .filter(|b| !b.text().is_empty())
            .map(|b| Control::persistent(b.text()))
            .collect();
    }
    Vec::new()
}

/// Build a profile event from a Bot API message.
pub(crate) fn to_event(msg: TgMessage, is_edit: bool) -> ProfileEvent {
    let controls = msg.reply_markup.as_ref().map(decode_markup);
    ProfileEvent {
        id: Uuid::new_v4(),
        source: msg.chat.username.unwrap_or_default().to_lowercase(),
        chat: msg.chat.id.to_string(),
        message_id: msg.message_id,
        text: msg.text.or(msg.caption).unwrap_or_default(),
        controls,
        is_edit,
        timestamp: chrono::Utc::now(),
    }
}
