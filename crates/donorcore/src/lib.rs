//! Donorcore - donor storage and conversation flows for the blood donor bot
//!
//! This library holds everything the bot does apart from talking to Telegram,
//! so flows can be driven and tested without a live transport.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, and logging
//! - `donor`: Blood groups and donor records
//! - `storage`: Donor store trait with SQLite and in-memory backends
//! - `conversation`: Per-user drafts, callback tags, and the flow engine

pub mod conversation;
pub mod core;
pub mod donor;
pub mod storage;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, ConfigError, Settings};
pub use conversation::{CallbackAction, FlowEngine, Reply, SessionStore};
pub use donor::{BloodGroup, DonorRecord};
pub use storage::{DonorStore, MemoryDonorStore, SqliteDonorStore, StoreError};
