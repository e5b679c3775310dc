//! Free text messages

use teloxide::prelude::*;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::{send_reply, Bot};
use donorcore::conversation::texts;
use donorcore::Reply;

/// Feeds a text message to the sender's active flow.
///
/// # Arguments
/// * `chat_id` - Chat to answer in
/// * `user_id` - Sender, keys the draft
/// * `text` - Message text as received
///
/// Text starting with `/` is an unknown command and never becomes a field
/// value. Store failures are logged and the user is asked to resend; the
/// flow stays on the same step.
pub async fn handle_text_message(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    text: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    if text.trim_start().starts_with('/') {
        log::debug!("Unknown command {:?} from user {}", text, user_id);
        send_reply(bot, chat_id, &Reply::text(texts::UNKNOWN_COMMAND)).await?;
        return Ok(());
    }

    let reply = match deps.flow.handle_text(user_id, text).await {
        Ok(Some(reply)) => reply,
        Ok(None) => Reply::text(texts::NO_ACTIVE_FLOW),
        Err(e) => {
            log::error!("Donor store failed for user {}: {}", user_id, e);
            Reply::text(texts::STORE_FAILURE)
        }
    };

    send_reply(bot, chat_id, &reply).await?;
    Ok(())
}
