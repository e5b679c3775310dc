//! Telegram bot handler tree configuration
//!
//! The dispatcher schema routes commands, free text, and button callbacks
//! to the flow engine. Handlers are plain async functions so integration
//! tests can call them against a mocked Bot API.

mod callbacks;
mod commands;
mod messages;
mod schema;
mod types;

pub use callbacks::handle_callback;
pub use commands::handle_command;
pub use messages::handle_text_message;
pub use schema::schema;
pub use types::{sender_id, HandlerDeps, HandlerError};
