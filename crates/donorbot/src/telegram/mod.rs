//! Telegram transport: bot setup, dispatcher schema, and reply rendering

pub mod bot;
pub mod handlers;
pub mod keyboard;
pub mod reply;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{handle_callback, handle_command, handle_text_message, schema, HandlerDeps, HandlerError};
pub use reply::send_reply;

pub type Bot = teloxide::Bot;
