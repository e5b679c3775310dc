//! Inline keyboards built from flow replies

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use donorcore::conversation::ReplyButton;

/// One callback button per `ReplyButton`, rows kept as given.
pub fn inline_keyboard(rows: &[Vec<ReplyButton>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.tag.clone()))
    }))
}
