//! Slash command handlers

use teloxide::types::Message;

use super::types::{sender_id, HandlerDeps, HandlerError};
use crate::telegram::{send_reply, Bot, Command};
use donorcore::conversation::reply::blood_group_selector;
use donorcore::conversation::{texts, Flow};
use donorcore::Reply;

/// Answers a command.
///
/// `/start`, `/find`, `/register`, and `/cancel` drop any flow the user
/// had in progress; `/help` leaves it alone.
pub async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let user_id = sender_id(msg);

    let reply = match cmd {
        Command::Start => {
            deps.flow.cancel(user_id).await;
            Reply::text(texts::WELCOME)
        }
        Command::Help => Reply::text(texts::HELP),
        Command::Find => {
            deps.flow.cancel(user_id).await;
            blood_group_selector(Flow::Search)
        }
        Command::Register => {
            deps.flow.cancel(user_id).await;
            blood_group_selector(Flow::Registration)
        }
        Command::Cancel => match deps.flow.cancel(user_id).await {
            Some(_) => Reply::text(texts::CANCELLED),
            None => Reply::text(texts::NOTHING_TO_CANCEL),
        },
    };

    send_reply(bot, msg.chat.id, &reply).await?;
    Ok(())
}
