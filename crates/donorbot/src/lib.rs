//! Donorbot - Telegram front end for the blood donor bot
//!
//! All flow logic lives in `donorcore`; this crate turns Telegram updates
//! into flow engine calls and renders the replies.
//!
//! # Module Structure
//!
//! - `cli`: Command line interface
//! - `telegram`: Bot setup, dispatcher schema, keyboards, and reply rendering

pub mod cli;
pub mod telegram;
