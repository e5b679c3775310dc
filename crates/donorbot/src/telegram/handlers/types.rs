//! Handler types and dependencies

use teloxide::types::Message;

use donorcore::FlowEngine;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub flow: FlowEngine,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(flow: FlowEngine) -> Self {
        Self { flow }
    }
}

/// Telegram user id of whoever sent `msg`.
///
/// Falls back to the chat id for messages without a sender, which in a
/// private chat is the same number.
pub fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0)
}
