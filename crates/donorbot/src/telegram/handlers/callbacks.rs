//! Blood group button presses

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::{send_reply, Bot};
use donorcore::CallbackAction;

/// Acknowledges the button press, then starts the flow the button belongs to.
///
/// Buttons with data we don't recognise are acknowledged and otherwise
/// ignored.
pub async fn handle_callback(bot: &Bot, q: &CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::warn!("Failed to answer callback query from user {}: {}", q.from.id, e);
    }

    let Some(action) = q.data.as_deref().and_then(CallbackAction::parse) else {
        log::debug!("Ignoring callback data {:?} from user {}", q.data, q.from.id);
        return Ok(());
    };

    let user_id = q.from.id.0 as i64;
    let chat_id = q.message.as_ref().map(|m| m.chat().id).unwrap_or(ChatId(user_id));

    let reply = deps.flow.select_group(user_id, action).await;
    send_reply(bot, chat_id, &reply).await?;
    Ok(())
}
