//! Conversation flows
//!
//! A user is in at most one flow at a time. Registration collects name,
//! phone, email, and location after a blood group is picked, then stores a
//! donor record. Search takes a location after a blood group is picked and
//! answers with matching donors.
//!
//! Nothing here knows about Telegram: inbound events are plain user ids,
//! texts, and callback tags, and every outcome is a [`Reply`] for the
//! transport to render.

pub mod draft;
pub mod flow;
pub mod reply;
pub mod sessions;
pub mod tag;
pub mod texts;

pub use draft::{Draft, RegistrationAdvance, RegistrationDraft, RegistrationStep, SearchDraft};
pub use flow::FlowEngine;
pub use reply::{Reply, ReplyButton};
pub use sessions::{SessionGuard, SessionStore};
pub use tag::{CallbackAction, Flow};
